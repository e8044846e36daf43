use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::widgets::{color, style};

/// Keys and what they do, e.g. `(&["←", "→"], "move")`.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

const SEPARATOR_STYLE: Style = Style::new().fg(color::GRAY);

/// A single centered line of key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let mut spans = vec![];
        for (i, (keys, desc)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, key) in keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, style::KEY));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(desc, style::HELP));
        }
        spans
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from(self.spans()).centered().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_text() {
        let bindings: &[KeyBinding] = &[(&["←", "→"], "move"), (&["q"], "quit")];
        let text = KeyBindingDisplay::new(bindings)
            .spans()
            .iter()
            .map(|span| span.content.to_string())
            .collect::<String>();
        assert_eq!(text, "←/→ move | q quit");
    }
}
