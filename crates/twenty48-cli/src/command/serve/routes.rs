use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Html,
};
use serde::{Deserialize, Serialize};
use twenty48_engine::{
    AppliedMove, BOARD_SIZE, Direction, EngineMoveError, LastAction, MoveSelector, Session,
    SessionMode, SetCellError, SharedSession, Snapshot, move_engine,
};

pub(crate) type BoxedSelector = Box<dyn MoveSelector + Send>;

#[derive(Clone)]
pub(crate) struct AppState {
    session: SharedSession,
    selector: Arc<Mutex<BoxedSelector>>,
    spawn_tiles: bool,
}

impl AppState {
    pub(crate) fn new(selector: BoxedSelector, spawn_tiles: bool) -> Self {
        Self {
            session: SharedSession::new(),
            selector: Arc::new(Mutex::new(selector)),
            spawn_tiles,
        }
    }

    pub(crate) fn spawn_tiles(&self) -> bool {
        self.spawn_tiles
    }

    /// Runs `f` on the blocking pool.
    ///
    /// The session lock can be held for a whole selector search, so async
    /// workers never take it directly.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T, ActionResult>
    where
        F: FnOnce(&AppState) -> T + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || f(&state))
            .await
            .map_err(|err| rejected(StatusCode::INTERNAL_SERVER_ERROR, &err))
    }

    /// Spawns a tile after a committed move, when enabled.
    fn finish_move(&self, session: &mut Session) {
        if self.spawn_tiles {
            session.spawn_tile(&mut rand::rng());
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StateResponse {
    board: [[u8; BOARD_SIZE]; BOARD_SIZE],
    values: [[u64; BOARD_SIZE]; BOARD_SIZE],
    score: u64,
    mode: SessionMode,
    last_action: LastAction,
    status: String,
    moves: u64,
    can_move: bool,
}

impl From<Snapshot> for StateResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            board: snapshot.board.to_ranks(),
            values: snapshot.board.to_values(),
            score: snapshot.score,
            mode: snapshot.mode,
            last_action: snapshot.last_action,
            status: snapshot.last_action.to_string(),
            moves: snapshot.stats.moves(),
            can_move: move_engine::can_move(&snapshot.board),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ActionStatus {
    Success,
    NoEffect,
    NoLegalMove,
    Rejected,
}

#[derive(Debug, Serialize)]
pub(crate) struct ActionResponse {
    status: ActionStatus,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    score_delta: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

type ActionResult = (StatusCode, Json<ActionResponse>);

fn success() -> ActionResult {
    (
        StatusCode::OK,
        Json(ActionResponse {
            status: ActionStatus::Success,
            direction: None,
            score_delta: None,
            message: None,
        }),
    )
}

fn moved(applied: AppliedMove) -> ActionResult {
    (
        StatusCode::OK,
        Json(ActionResponse {
            status: ActionStatus::Success,
            direction: Some(applied.direction),
            score_delta: Some(applied.score_delta),
            message: None,
        }),
    )
}

fn engine_error(err: EngineMoveError) -> ActionResult {
    let (status, direction) = match err {
        EngineMoveError::NoLegalMove => (ActionStatus::NoLegalMove, None),
        EngineMoveError::NoEffect(err) => (ActionStatus::NoEffect, Some(err.direction)),
    };
    (
        StatusCode::OK,
        Json(ActionResponse {
            status,
            direction,
            score_delta: None,
            message: Some(err.to_string()),
        }),
    )
}

fn rejected(code: StatusCode, err: &dyn std::error::Error) -> ActionResult {
    tracing::warn!(%err, "request rejected");
    (
        code,
        Json(ActionResponse {
            status: ActionStatus::Rejected,
            direction: None,
            score_delta: None,
            message: Some(err.to_string()),
        }),
    )
}

fn edit_result(result: Result<(), SetCellError>) -> ActionResult {
    match result {
        Ok(()) => success(),
        Err(err) => rejected(StatusCode::UNPROCESSABLE_ENTITY, &err),
    }
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

pub(crate) async fn get_state(
    State(state): State<AppState>,
) -> Result<Json<StateResponse>, ActionResult> {
    let snapshot = state.run_blocking(|state| state.session.snapshot()).await?;
    Ok(Json(snapshot.into()))
}

pub(crate) async fn clear_board(State(state): State<AppState>) -> ActionResult {
    match state.run_blocking(|state| state.session.clear()).await {
        Ok(()) => success(),
        Err(err) => err,
    }
}

pub(crate) async fn random_board(State(state): State<AppState>) -> ActionResult {
    match state
        .run_blocking(|state| state.session.randomize(&mut rand::rng()))
        .await
    {
        Ok(()) => success(),
        Err(err) => err,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetCellRequest {
    row: usize,
    col: usize,
    rank: u32,
}

pub(crate) async fn set_cell(
    State(state): State<AppState>,
    Json(req): Json<SetCellRequest>,
) -> ActionResult {
    match state
        .run_blocking(move |state| state.session.set_cell(req.row, req.col, req.rank))
        .await
    {
        Ok(result) => edit_result(result),
        Err(err) => err,
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Step {
    Up,
    Down,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StepCellRequest {
    row: usize,
    col: usize,
    step: Step,
}

pub(crate) async fn step_cell(
    State(state): State<AppState>,
    Json(req): Json<StepCellRequest>,
) -> ActionResult {
    let result = state
        .run_blocking(move |state| match req.step {
            Step::Up => state.session.increase_cell(req.row, req.col),
            Step::Down => state.session.decrease_cell(req.row, req.col),
        })
        .await;
    match result {
        Ok(result) => edit_result(result),
        Err(err) => err,
    }
}

pub(crate) async fn ai_move(State(state): State<AppState>) -> ActionResult {
    let result = state
        .run_blocking(|state| {
            // Selector before session; no other path takes both locks.
            let mut selector = state
                .selector
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            state.session.with(|session| {
                let applied = session.request_engine_move(selector.as_mut())?;
                state.finish_move(session);
                Ok::<_, EngineMoveError>(applied)
            })
        })
        .await;

    match result {
        Ok(Ok(applied)) => moved(applied),
        Ok(Err(err)) => engine_error(err),
        Err(err) => err,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionRequest {
    #[serde(rename = "move")]
    index: i64,
}

pub(crate) async fn execute_direction(
    State(state): State<AppState>,
    Json(req): Json<DirectionRequest>,
) -> ActionResult {
    let direction = match Direction::try_from(req.index) {
        Ok(direction) => direction,
        Err(err) => return rejected(StatusCode::UNPROCESSABLE_ENTITY, &err),
    };
    let result = state
        .run_blocking(move |state| {
            state.session.with(|session| {
                let applied = session.apply_direction(direction)?;
                state.finish_move(session);
                Ok::<_, EngineMoveError>(applied)
            })
        })
        .await;
    match result {
        Ok(Ok(applied)) => moved(applied),
        Ok(Err(err)) => engine_error(err),
        Err(err) => err,
    }
}
