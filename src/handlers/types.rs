use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{error, instrument};
use utoipa::ToSchema;

use super::error::AppError;
use crate::storage::{NewTodo, TodoId, UpdateTodo};

/// Request body shared by create and update. Keys outside the known set end
/// up in `extra` and reject the request.
#[derive(Debug, Deserialize)]
pub(crate) struct TodoPayload {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub deadline_at: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Distinguishes a key sent as `null` from a missing key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TodoPayload {
    pub(crate) fn into_new_todo(self) -> Result<NewTodo, AppError> {
        let Some(title) = self.title else {
            return Err(AppError::TitleRequired);
        };
        reject_extra_fields(&self.extra)?;

        let deadline_at = self
            .deadline_at
            .flatten()
            .as_deref()
            .map(parse_deadline)
            .transpose()?;

        let mut todo = NewTodo::new(title);
        todo.description = self.description.flatten();
        todo.deadline_at = deadline_at;
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        Ok(todo)
    }

    pub(crate) fn into_patch(self, id: TodoId) -> Result<UpdateTodo, AppError> {
        if let Some(body_id) = &self.id {
            if body_id.as_i64() != Some(i64::from(id.get())) {
                error!(body_id = %body_id, path_id = %id, "id mismatch");
                return Err(AppError::IdMismatch);
            }
        }
        reject_extra_fields(&self.extra)?;

        let deadline_at = match self.deadline_at {
            Some(Some(raw)) => Some(Some(parse_deadline(&raw)?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(UpdateTodo {
            title: self.title,
            description: self.description,
            completed: self.completed,
            deadline_at,
        })
    }
}

fn reject_extra_fields(extra: &Map<String, Value>) -> Result<(), AppError> {
    if extra.is_empty() {
        return Ok(());
    }
    let keys: Vec<&str> = extra.keys().map(String::as_str).collect();
    error!(?keys, "extra fields in request body");
    Err(AppError::ExtraFields)
}

/// Parses an ISO-8601 date-time. Values with an offset are converted to UTC,
/// a bare date means midnight.
pub(crate) fn parse_deadline(raw: &str) -> Result<NaiveDateTime, AppError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.naive_utc());
    }

    error!(deadline_at = raw, "malformed deadline_at");
    Err(AppError::InvalidDeadline(raw.to_owned()))
}

/// JSON body extractor answering with the service's own error shape.
pub(crate) struct TodoJson(pub TodoPayload);

impl<S> FromRequest<S> for TodoJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    #[instrument(name = "construct_todo_payload_from_request", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<TodoPayload>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                error!(error = ?e, "Failed to parse todo payload");
                AppError::InvalidBody(e.body_text())
            })?;
        Ok(Self(payload))
    }
}

/// Path id extractor. Anything that is not a valid id cannot name a stored
/// todo and is answered as not found.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TodoPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    #[instrument(name = "construct_todo_id_from_parts", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to extract todo id");
                AppError::NotFound
            })?;

        raw.parse::<TodoId>().map(Self).map_err(|e| {
            error!(error = %e, raw_id = %raw, "Invalid todo id");
            AppError::NotFound
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListParams {
    Window { days: i64 },
    Completed { value: bool },
    All,
}

#[derive(Debug, Deserialize)]
struct RawListParams {
    window: Option<String>,
    completed: Option<String>,
}

impl RawListParams {
    /// `window` wins over `completed`. An empty `completed` is ignored.
    fn into_params(self) -> Result<ListParams, AppError> {
        if let Some(window) = self.window {
            return window
                .trim()
                .parse::<i64>()
                .map(|days| ListParams::Window { days })
                .map_err(|e| {
                    error!(error = %e, window = %window, "Invalid window");
                    AppError::InvalidWindow(window)
                });
        }
        match self.completed {
            Some(value) if !value.is_empty() => Ok(ListParams::Completed {
                value: value.eq_ignore_ascii_case("true"),
            }),
            _ => Ok(ListParams::All),
        }
    }
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    #[instrument(name = "construct_list_params_from_parts", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw): Query<RawListParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to construct RawListParams from request parts");
                AppError::InvalidQuery(e.body_text())
            })?;

        raw.into_params()
    }
}

/// OpenAPI shape of the create and update body. Requests are read through
/// [`TodoPayload`], which cannot derive a schema because of its catch-all map.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub(crate) struct TodoBody {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    #[schema(example = "2023-02-27T00:00:00")]
    pub deadline_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> TodoPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_requires_title() {
        let result = payload(json!({"description": "x"})).into_new_todo();
        assert!(matches!(result, Err(AppError::TitleRequired)));

        let result = payload(json!({"title": null})).into_new_todo();
        assert!(matches!(result, Err(AppError::TitleRequired)));
    }

    #[test]
    fn title_is_checked_before_extra_fields() {
        let result = payload(json!({"foo": "bar"})).into_new_todo();
        assert!(matches!(result, Err(AppError::TitleRequired)));

        let result = payload(json!({"title": "A", "foo": "bar"})).into_new_todo();
        assert!(matches!(result, Err(AppError::ExtraFields)));
    }

    #[test]
    fn create_defaults() {
        let todo = payload(json!({"title": "A", "id": 42})).into_new_todo().unwrap();
        assert_eq!(todo, NewTodo::new("A"));
    }

    #[test]
    fn create_parses_deadline() {
        let todo = payload(json!({
            "title": "A",
            "description": "d",
            "completed": true,
            "deadline_at": "2023-02-27T00:00:00",
        }))
        .into_new_todo()
        .unwrap();

        assert_eq!(todo.description.as_deref(), Some("d"));
        assert!(todo.completed);
        assert_eq!(
            todo.deadline_at,
            NaiveDate::from_ymd_opt(2023, 2, 27).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
    }

    #[test]
    fn create_rejects_malformed_deadline() {
        let result = payload(json!({"title": "A", "deadline_at": "next week"})).into_new_todo();
        assert!(matches!(result, Err(AppError::InvalidDeadline(raw)) if raw == "next week"));
    }

    #[test]
    fn deadline_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 15, 0))
            .unwrap();

        assert_eq!(parse_deadline("2024-03-01T10:15:00").unwrap(), expected);
        assert_eq!(parse_deadline("2024-03-01 10:15:00").unwrap(), expected);
        assert_eq!(parse_deadline("2024-03-01T10:15").unwrap(), expected);
        assert_eq!(parse_deadline("2024-03-01T12:15:00+02:00").unwrap(), expected);
        assert_eq!(parse_deadline("2024-03-01T10:15:00Z").unwrap(), expected);
        assert_eq!(
            parse_deadline("2024-03-01").unwrap(),
            expected.date().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_deadline("2024-13-01").is_err());
    }

    #[test]
    fn patch_keeps_missing_fields_untouched() {
        let patch = payload(json!({"completed": true}))
            .into_patch(TodoId::from(1))
            .unwrap();
        assert_eq!(
            patch,
            UpdateTodo {
                completed: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn patch_null_clears_nullable_fields() {
        let patch = payload(json!({"description": null, "deadline_at": null, "title": null}))
            .into_patch(TodoId::from(1))
            .unwrap();
        assert_eq!(
            patch,
            UpdateTodo {
                description: Some(None),
                deadline_at: Some(None),
                ..Default::default()
            }
        );
    }

    #[test]
    fn patch_parses_or_rejects_deadline() {
        let patch = payload(json!({"deadline_at": "2031-05-06T07:08:09"}))
            .into_patch(TodoId::from(1))
            .unwrap();
        assert_eq!(
            patch.deadline_at,
            Some(NaiveDate::from_ymd_opt(2031, 5, 6).and_then(|d| d.and_hms_opt(7, 8, 9)))
        );

        let result = payload(json!({"title": "B", "deadline_at": "soon"})).into_patch(TodoId::from(1));
        assert!(matches!(result, Err(AppError::InvalidDeadline(raw)) if raw == "soon"));
    }

    #[test]
    fn patch_id_must_match_path() {
        assert!(payload(json!({"id": 3, "title": "B"}))
            .into_patch(TodoId::from(3))
            .is_ok());
        assert!(payload(json!({"id": null}))
            .into_patch(TodoId::from(3))
            .is_ok());
        assert!(matches!(
            payload(json!({"id": 4})).into_patch(TodoId::from(3)),
            Err(AppError::IdMismatch)
        ));
        assert!(matches!(
            payload(json!({"id": "3"})).into_patch(TodoId::from(3)),
            Err(AppError::IdMismatch)
        ));
    }

    #[test]
    fn patch_id_mismatch_wins_over_extra_fields() {
        let result = payload(json!({"id": 4, "foo": 1})).into_patch(TodoId::from(3));
        assert!(matches!(result, Err(AppError::IdMismatch)));

        let result = payload(json!({"id": 3, "foo": 1})).into_patch(TodoId::from(3));
        assert!(matches!(result, Err(AppError::ExtraFields)));
    }

    #[test]
    fn list_params() {
        let parse = |window: Option<&str>, completed: Option<&str>| {
            RawListParams {
                window: window.map(str::to_owned),
                completed: completed.map(str::to_owned),
            }
            .into_params()
        };

        assert_eq!(parse(None, None).unwrap(), ListParams::All);
        assert_eq!(parse(None, Some("")).unwrap(), ListParams::All);
        assert_eq!(
            parse(None, Some("TRUE")).unwrap(),
            ListParams::Completed { value: true }
        );
        assert_eq!(
            parse(None, Some("yes")).unwrap(),
            ListParams::Completed { value: false }
        );
        assert_eq!(
            parse(Some("-3"), Some("true")).unwrap(),
            ListParams::Window { days: -3 }
        );
        assert!(matches!(
            parse(Some("soon"), None),
            Err(AppError::InvalidWindow(_))
        ));
    }
}
