//! Stand-in for the roi.ru petition API.
//!
//! Serves fixture data under `/api/` with the same envelope and quirks as the
//! real service: every response is HTTP 200, failures are reported in the
//! envelope's `error` field, and line breaks inside string values are left
//! unescaped.

use std::{collections::BTreeMap, io, sync::Arc};

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{
    json,
    ser::{CharEscape, CompactFormatter, Formatter},
    Value,
};
use tokio::net::TcpListener;
use tracing::debug;

/// Petition with well-known poll dates and attachments.
pub const KNOWN_PETITION_ID: u64 = 759;
pub const KNOWN_POLL_BEGIN: i64 = 1365105600;
pub const KNOWN_POLL_END: i64 = 1373875200;

/// Petition still open for voting: no dates, no decisions.
pub const OPEN_PETITION_ID: u64 = 1001;

pub const NOT_FOUND_CODE: i64 = 404;
pub const BAD_REQUEST_CODE: i64 = 400;

#[derive(Clone, Debug, Serialize)]
pub struct IdTitle {
    pub id: u64,
    pub title: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct IdRef {
    pub id: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListPetition {
    pub id: u64,
    pub title: String,
    pub level: IdRef,
    pub status: IdRef,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    data: Option<&'a T>,
    error: Option<ErrorBody>,
}

#[derive(Serialize)]
struct ErrorBody {
    code: i64,
    text: String,
}

/// Everything the server answers with.
#[derive(Clone, Debug)]
pub struct Fixtures {
    pub statuses: Vec<IdTitle>,
    pub levels: Vec<IdTitle>,
    pub archive: Vec<ListPetition>,
    pub complete: Vec<ListPetition>,
    pub advisement: Vec<ListPetition>,
    pub poll: Vec<ListPetition>,
    /// Full petitions in wire shape, keyed by id.
    pub petitions: BTreeMap<u64, Value>,
}

impl Default for Fixtures {
    fn default() -> Self {
        let mut petitions = BTreeMap::new();
        petitions.insert(KNOWN_PETITION_ID, known_petition());
        petitions.insert(OPEN_PETITION_ID, open_petition());

        Self {
            statuses: vec![
                id_title(1, "Голосование"),
                id_title(2, "На рассмотрении"),
                id_title(3, "Решение принято"),
                id_title(4, "Архив"),
            ],
            levels: vec![
                id_title(1, "Федеральный"),
                id_title(2, "Региональный"),
                id_title(3, "Муниципальный"),
            ],
            archive: vec![
                list_petition(KNOWN_PETITION_ID, "Запрет на использование мигалок", 1, 4),
                list_petition(760, "Ремонт дорог", 2, 4),
            ],
            complete: vec![list_petition(812, "Открытые данные бюджета", 1, 3)],
            advisement: Vec::new(),
            poll: vec![list_petition(OPEN_PETITION_ID, "Велодорожки в центре", 3, 1)],
            petitions,
        }
    }
}

fn id_title(id: u64, title: &str) -> IdTitle {
    IdTitle {
        id,
        title: title.to_string(),
    }
}

fn list_petition(id: u64, title: &str, level: u64, status: u64) -> ListPetition {
    ListPetition {
        id,
        title: title.to_string(),
        level: IdRef { id: level },
        status: IdRef { id: status },
    }
}

fn known_petition() -> Value {
    json!({
        "id": KNOWN_PETITION_ID,
        "title": "Запрет на использование мигалок",
        "code": "77Ф759",
        "url": "https://www.roi.ru/759/",
        "description": "Первый абзац.\r\nВторой абзац.",
        "prospective": "Равенство участников дорожного движения.",
        "level": {"id": 1, "title": "Федеральный"},
        "status": {"id": 4, "title": "Архив"},
        "result": {"id": 0, "title": "Решение не принято"},
        "category": [
            {"id": 12, "title": "Транспорт"},
            {"id": 17, "title": "Государственное управление"}
        ],
        "vote": {"progress": 21.4, "threshold": 100000, "affirmative": 21400, "negative": 1200},
        "attachment": {
            "decision": [
                {"title": "Заключение экспертной группы", "url": "https://www.roi.ru/files/759/decision.pdf"}
            ],
            "documents": [
                {"title": "Текст инициативы", "url": "https://www.roi.ru/files/759/text.pdf"},
                {"title": "Обоснование", "url": "https://www.roi.ru/files/759/reason.pdf"}
            ]
        },
        "decision": [
            {"text": "Экспертная группа рассмотрела инициативу."},
            {"text": "Решение\nотложено."}
        ],
        "date": {"poll": {"begin": KNOWN_POLL_BEGIN, "end": KNOWN_POLL_END}}
    })
}

fn open_petition() -> Value {
    json!({
        "id": OPEN_PETITION_ID,
        "title": "Велодорожки в центре",
        "code": "50М1001",
        "url": "https://www.roi.ru/1001/",
        "description": "Построить сеть велодорожек.",
        "prospective": null,
        "level": {"id": 3, "title": "Муниципальный"},
        "status": {"id": 1, "title": "Голосование"},
        "result": null,
        "category": [{"id": 12, "title": "Транспорт"}],
        "vote": {"progress": 0.5, "threshold": 1000, "affirmative": 5, "negative": 0},
        "attachment": {},
        "decision": [],
        "date": {"poll": {"begin": null, "end": null}}
    })
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::default())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/api/attributes/status.json", get(statuses))
        .route("/api/attributes/level.json", get(levels))
        .route("/api/petitions/archive.json", get(archive))
        .route("/api/petitions/complete.json", get(complete))
        .route("/api/petitions/advisement.json", get(advisement))
        .route("/api/petitions/poll.json", get(poll))
        .route("/api/petition/{file}", get(petition))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn statuses(State(db): State<Db>) -> Response {
    data(&db.statuses)
}

async fn levels(State(db): State<Db>) -> Response {
    data(&db.levels)
}

async fn archive(State(db): State<Db>) -> Response {
    data(&db.archive)
}

async fn complete(State(db): State<Db>) -> Response {
    data(&db.complete)
}

async fn advisement(State(db): State<Db>) -> Response {
    data(&db.advisement)
}

async fn poll(State(db): State<Db>) -> Response {
    data(&db.poll)
}

async fn petition(State(db): State<Db>, Path(file): Path<String>) -> Response {
    let Some(id) = file
        .strip_suffix(".json")
        .and_then(|id| id.parse::<u64>().ok())
    else {
        debug!(%file, "malformed petition path");
        return error(BAD_REQUEST_CODE, "Некорректный запрос");
    };

    match db.petitions.get(&id) {
        Some(petition) => data(petition),
        None => {
            debug!(id, "petition not found");
            error(NOT_FOUND_CODE, "Петиция не найдена")
        }
    }
}

fn data<T: Serialize>(data: &T) -> Response {
    render(&Envelope {
        data: Some(data),
        error: None,
    })
}

fn error(code: i64, text: &str) -> Response {
    render::<Value>(&Envelope {
        data: None,
        error: Some(ErrorBody {
            code,
            text: text.to_string(),
        }),
    })
}

/// JSON formatter that leaves line breaks inside strings unescaped, as
/// upstream does. Every other escape is emitted normally.
struct RawLineBreaks;

impl Formatter for RawLineBreaks {
    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::LineFeed => writer.write_all(b"\n"),
            CharEscape::CarriageReturn => writer.write_all(b"\r"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

fn to_upstream_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut body = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut body, RawLineBreaks);
    value.serialize(&mut serializer)?;
    Ok(body)
}

fn render<T: Serialize>(envelope: &Envelope<'_, T>) -> Response {
    let body = match to_upstream_json(envelope) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize fixture");
            br#"{"data":null,"error":{"code":500,"text":"internal error"}}"#.to_vec()
        }
    };
    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}
