use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use twenty48_evaluator::expectimax::{ExpectimaxConfig, ExpectimaxSelector};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::open(path)?,
            None => Output::stdout(),
        };
        output.write_json(value)
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self)
            .with_context(|| format!("Failed to write newline to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Builds the expectimax selector, with its configuration read from
/// `config_path` when given.
pub fn build_selector(config_path: Option<&Path>) -> anyhow::Result<ExpectimaxSelector> {
    let config = match config_path {
        Some(path) => read_json_file::<ExpectimaxConfig, _>("selector config", path)?,
        None => ExpectimaxConfig::default(),
    };
    let selector = ExpectimaxSelector::new(config)?;
    tracing::debug!(?config, "selector ready");
    Ok(selector)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("twenty48-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_build_selector_from_file() {
        let path = temp_path("selector.json");
        std::fs::write(&path, r#"{ "depth": 1, "prob_cutoff": 0.01 }"#).unwrap();
        let selector = build_selector(Some(&path)).unwrap();
        assert_eq!(selector.config().depth, 1);
        assert!((selector.config().prob_cutoff - 0.01).abs() < f64::EPSILON);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_build_selector_rejects_bad_config() {
        let path = temp_path("bad-selector.json");
        std::fs::write(&path, r#"{ "depth": 0 }"#).unwrap();
        let err = build_selector(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("depth"), "{err}");
        std::fs::remove_file(&path).unwrap();

        let err = build_selector(Some(&temp_path("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to open selector config file"));
    }

    #[test]
    fn test_build_default_selector() {
        let selector = build_selector(None).unwrap();
        assert_eq!(*selector.config(), ExpectimaxConfig::default());
    }
}
