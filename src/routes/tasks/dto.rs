use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

// Fields stay loosely typed so a wrong JSON type becomes a readable 400
// instead of a generic deserialization rejection.

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: Option<Value>,
    pub completed: Option<Value>,
}

/// A validated insert: the title is already trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
}

/// A validated partial update. At least one field is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TryFrom<CreateTask> for NewTask {
    type Error = ApiError;

    fn try_from(body: CreateTask) -> Result<Self, Self::Error> {
        match body.title {
            None => Err(ApiError::validation("title is required")),
            Some(value) => Ok(NewTask {
                title: clean_title(value)?,
            }),
        }
    }
}

impl TryFrom<UpdateTask> for TaskChanges {
    type Error = ApiError;

    fn try_from(body: UpdateTask) -> Result<Self, Self::Error> {
        let title = body.title.map(clean_title).transpose()?;

        let completed = match body.completed {
            None => None,
            Some(Value::Bool(b)) => Some(b),
            Some(_) => return Err(ApiError::validation("completed must be a boolean")),
        };

        if title.is_none() && completed.is_none() {
            return Err(ApiError::validation(
                "nothing to update: supply title and/or completed",
            ));
        }

        Ok(TaskChanges { title, completed })
    }
}

fn clean_title(value: Value) -> Result<String, ApiError> {
    let Value::String(raw) = value else {
        return Err(ApiError::validation("title must be a string"));
    };

    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::validation("title cannot be empty"));
    }

    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: Value) -> Result<NewTask, ApiError> {
        NewTask::try_from(serde_json::from_value::<CreateTask>(body).unwrap())
    }

    fn update(body: Value) -> Result<TaskChanges, ApiError> {
        TaskChanges::try_from(serde_json::from_value::<UpdateTask>(body).unwrap())
    }

    #[test]
    fn test_create_trims_title() {
        let task = create(json!({ "title": "  Buy milk " })).unwrap();
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn test_create_rejects_missing_or_blank_title() {
        assert!(matches!(create(json!({})), Err(ApiError::Validation(_))));
        assert!(matches!(create(json!({ "title": null })), Err(ApiError::Validation(_))));
        assert!(matches!(create(json!({ "title": "" })), Err(ApiError::Validation(_))));
        assert!(matches!(create(json!({ "title": " \t\n" })), Err(ApiError::Validation(_))));
        assert!(matches!(create(json!({ "title": 42 })), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_update_accepts_either_field() {
        assert_eq!(
            update(json!({ "title": " Walk dog " })).unwrap(),
            TaskChanges { title: Some("Walk dog".into()), completed: None }
        );
        assert_eq!(
            update(json!({ "completed": true })).unwrap(),
            TaskChanges { title: None, completed: Some(true) }
        );
        assert_eq!(
            update(json!({ "title": "x", "completed": false })).unwrap(),
            TaskChanges { title: Some("x".into()), completed: Some(false) }
        );
    }

    #[test]
    fn test_update_requires_some_field() {
        assert!(matches!(update(json!({})), Err(ApiError::Validation(_))));
        assert!(matches!(
            update(json!({ "title": null, "completed": null })),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_update_rejects_bad_values() {
        assert!(matches!(update(json!({ "title": "   " })), Err(ApiError::Validation(_))));
        assert!(matches!(update(json!({ "completed": "yes" })), Err(ApiError::Validation(_))));
        assert!(matches!(update(json!({ "completed": 1 })), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_legacy_done_field_is_ignored() {
        assert!(matches!(update(json!({ "done": true })), Err(ApiError::Validation(_))));
    }
}
