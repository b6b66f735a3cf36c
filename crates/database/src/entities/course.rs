use log::warn;
use models::{course::CourseRecord, score::Score};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    /// `[{ "url": .., "type": .. }]`
    pub files: Json,
    /// `["<user id>", ..]`
    pub enrolled_students: Json,
    /// `{ "<user id>": <score> }`
    pub ratings: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decodes a JSON column, falling back to the empty value when it is
/// missing or malformed
fn decode_or_default<T: DeserializeOwned + Default>(
    course_id: &Uuid,
    column: &str,
    value: Json,
) -> T {
    if value.is_null() {
        return T::default();
    }

    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed {column} on course {course_id}: {e}");
        T::default()
    })
}

/// Decodes stored ratings, dropping any score outside the valid range
fn decode_ratings(course_id: &Uuid, value: Json) -> BTreeMap<String, Score> {
    let raw: BTreeMap<String, Json> = decode_or_default(course_id, "ratings", value);

    raw.into_iter()
        .filter_map(|(user_id, score)| match score.as_f64().map(Score::new) {
            Some(Ok(score)) => Some((user_id, score)),
            _ => {
                warn!("Dropping invalid rating {score} by {user_id} on course {course_id}");
                None
            }
        })
        .collect()
}

impl From<Model> for CourseRecord {
    fn from(model: Model) -> Self {
        let id = model.id;

        CourseRecord {
            id: id.to_string(),
            title: model.title,
            description: model.description,
            category: model.category,
            instructor_name: model.instructor_name,
            instructor_email: model.instructor_email,
            price: model.price,
            files: decode_or_default(&id, "files", model.files),
            enrolled_students: decode_or_default(&id, "enrolled_students", model.enrolled_students),
            ratings: decode_ratings(&id, model.ratings),
            created_at: Some(model.created_at),
        }
    }
}
