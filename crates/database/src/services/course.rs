use crate::{
    entities::course,
    services::store::{CourseStore, StoreError},
};
use chrono::Utc;
use futures::{FutureExt, future::BoxFuture};
use log::{debug, info};
use models::{
    course::{CourseRecord, NewCourse, validate_title},
    score::Score,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::{Expr, Json},
};
use serde_json::{Map, json};
use uuid::Uuid;

/// Course store backed by the `courses` table
pub struct CourseService {
    db: DatabaseConnection,
}

impl CourseService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ids that are not UUIDs cannot match any stored course
    fn parse_id(id: &str) -> Option<Uuid> {
        Uuid::parse_str(id).ok()
    }

    fn to_records(models: Vec<course::Model>) -> Vec<CourseRecord> {
        models.into_iter().map(CourseRecord::from).collect()
    }

    /// Loads a course and locks its row for the rest of the transaction
    async fn find_for_update(
        txn: &DatabaseTransaction,
        id: &str,
    ) -> Result<course::Model, StoreError> {
        let uuid = Self::parse_id(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        course::Entity::find_by_id(uuid)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert_course(
        &self,
        new_course: NewCourse,
        instructor_email: String,
    ) -> Result<CourseRecord, StoreError> {
        new_course.validate()?;

        let now = Utc::now();
        let model = course::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_course.title),
            description: Set(new_course.description),
            category: Set(new_course.category),
            instructor_name: Set(new_course.instructor_name),
            instructor_email: Set(instructor_email),
            price: Set(new_course.price),
            files: Set(serde_json::to_value(&new_course.files)?),
            enrolled_students: Set(json!([])),
            ratings: Set(json!({})),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!("Created course {} ({})", model.id, model.title);
        Ok(CourseRecord::from(model))
    }

    async fn add_student(&self, id: &str, user_id: &str) -> Result<(), StoreError> {
        let txn = self.db.begin().await?;
        let model = Self::find_for_update(&txn, id).await?;

        let Some(students) = with_student(id, model.enrolled_students, user_id)? else {
            debug!("User {user_id} is already enrolled in course {id}");
            txn.commit().await?;
            return Ok(());
        };

        Self::set_column(&txn, model.id, course::Column::EnrolledStudents, students).await?;

        txn.commit().await?;
        info!("Enrolled user {user_id} in course {id}");
        Ok(())
    }

    async fn put_rating(&self, id: &str, user_id: &str, score: Score) -> Result<(), StoreError> {
        let txn = self.db.begin().await?;
        let model = Self::find_for_update(&txn, id).await?;
        let ratings = with_rating(id, model.ratings, user_id, score)?;

        Self::set_column(&txn, model.id, course::Column::Ratings, ratings).await?;

        txn.commit().await?;
        info!("User {user_id} rated course {id} with {score}");
        Ok(())
    }

    /// Overwrites one JSON column of a locked row
    async fn set_column(
        txn: &DatabaseTransaction,
        id: Uuid,
        column: course::Column,
        value: Json,
    ) -> Result<(), StoreError> {
        course::Entity::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.eq(id))
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn rename(&self, id: &str, title: String) -> Result<(), StoreError> {
        validate_title(&title)?;
        let uuid = Self::parse_id(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let result = course::Entity::update_many()
            .col_expr(course::Column::Title, Expr::value(title))
            .col_expr(course::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(course::Column::Id.eq(uuid))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let uuid = Self::parse_id(id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let result = course::Entity::delete_by_id(uuid).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        info!("Deleted course {id}");
        Ok(())
    }
}

/// Appends the user to the stored student list, keeping every entry already
/// there. Returns `None` when the user is already enrolled.
fn with_student(id: &str, students: Json, user_id: &str) -> Result<Option<Json>, StoreError> {
    let mut students = match students {
        Json::Array(students) => students,
        Json::Null => Vec::new(),
        _ => {
            return Err(StoreError::Corrupt {
                course: id.to_string(),
                column: "enrolled_students",
            });
        }
    };

    if students.iter().any(|student| student.as_str() == Some(user_id)) {
        return Ok(None);
    }

    students.push(Json::from(user_id));
    Ok(Some(Json::Array(students)))
}

/// Sets the user's entry in the stored ratings, leaving other entries as stored
fn with_rating(id: &str, ratings: Json, user_id: &str, score: Score) -> Result<Json, StoreError> {
    let mut ratings = match ratings {
        Json::Object(ratings) => ratings,
        Json::Null => Map::new(),
        _ => {
            return Err(StoreError::Corrupt {
                course: id.to_string(),
                column: "ratings",
            });
        }
    };

    ratings.insert(user_id.to_string(), Json::from(score.value()));
    Ok(Json::Object(ratings))
}

impl CourseStore for CourseService {
    fn fetch_courses(&self) -> BoxFuture<'_, Result<Vec<CourseRecord>, StoreError>> {
        async move {
            let models = course::Entity::find()
                .order_by_asc(course::Column::CreatedAt)
                .all(&self.db)
                .await?;

            Ok(Self::to_records(models))
        }
        .boxed()
    }

    fn fetch_course<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<Option<CourseRecord>, StoreError>> {
        async move {
            let Some(uuid) = Self::parse_id(id) else {
                return Ok(None);
            };

            let model = course::Entity::find_by_id(uuid).one(&self.db).await?;
            Ok(model.map(CourseRecord::from))
        }
        .boxed()
    }

    fn fetch_instructor_courses<'a>(
        &'a self,
        instructor_email: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>> {
        async move {
            let models = course::Entity::find()
                .filter(course::Column::InstructorEmail.eq(instructor_email))
                .order_by_asc(course::Column::CreatedAt)
                .all(&self.db)
                .await?;

            Ok(Self::to_records(models))
        }
        .boxed()
    }

    fn fetch_enrolled_courses<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<CourseRecord>, StoreError>> {
        async move {
            // jsonb containment: enrolled_students @> '["<user id>"]'
            let models = course::Entity::find()
                .filter(Expr::cust_with_values(
                    "courses.enrolled_students @> $1",
                    [json!([user_id])],
                ))
                .order_by_asc(course::Column::CreatedAt)
                .all(&self.db)
                .await?;

            Ok(Self::to_records(models))
        }
        .boxed()
    }

    fn create_course(
        &self,
        course: NewCourse,
        instructor_email: String,
    ) -> BoxFuture<'_, Result<CourseRecord, StoreError>> {
        self.insert_course(course, instructor_email).boxed()
    }

    fn enroll<'a>(&'a self, id: &'a str, user_id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        self.add_student(id, user_id).boxed()
    }

    fn submit_rating<'a>(
        &'a self,
        id: &'a str,
        user_id: &'a str,
        score: Score,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        self.put_rating(id, user_id, score).boxed()
    }

    fn update_title<'a>(
        &'a self,
        id: &'a str,
        title: String,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        self.rename(id, title).boxed()
    }

    fn delete_course<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), StoreError>> {
        self.remove(id).boxed()
    }
}
