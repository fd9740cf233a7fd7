use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info, instrument};

use models::contact::{
    self, like_pattern, BirthdayWindow, ContactBase, ContactUpdate, SearchCriteria, LIKE_ESCAPE,
};
use crate::errors::ServiceError;

/// List contacts ordered by id, skipping `skip` rows and returning at most `limit`.
#[instrument(skip(db))]
pub async fn list_contacts(db: &DatabaseConnection, skip: u64, limit: u64) -> Result<Vec<contact::Model>, ServiceError> {
    let rows = contact::Entity::find()
        .order_by_asc(contact::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?;
    debug!(count = rows.len(), "contacts_listed");
    Ok(rows)
}

/// Get a contact by id; more than one matching row is an integrity error.
#[instrument(skip(db))]
pub async fn get_contact(db: &DatabaseConnection, id: i32) -> Result<Option<contact::Model>, ServiceError> {
    let mut rows = contact::Entity::find()
        .filter(contact::Column::Id.eq(id))
        .limit(2)
        .all(db)
        .await?;
    if rows.len() > 1 {
        return Err(ServiceError::Integrity(format!("multiple contacts share id {id}")));
    }
    Ok(rows.pop())
}

/// Validate and insert a contact, returning it with its assigned id.
#[instrument(skip(db, body))]
pub async fn create_contact(db: &DatabaseConnection, body: ContactBase) -> Result<contact::Model, ServiceError> {
    body.validate()?;
    let created = body.into_active_model(Utc::now().into()).insert(db).await?;
    info!(contact_id = created.id, "contact_created");
    Ok(created)
}

/// Apply the supplied fields of `body` to an existing contact.
#[instrument(skip(db, body))]
pub async fn update_contact(db: &DatabaseConnection, id: i32, body: ContactUpdate) -> Result<Option<contact::Model>, ServiceError> {
    body.validate()?;
    let Some(found) = get_contact(db, id).await? else {
        debug!(contact_id = id, "contact_update_missing");
        return Ok(None);
    };
    let mut am: contact::ActiveModel = found.into();
    body.apply(&mut am);
    am.updated_at = Set(Some(Utc::now().into()));
    let updated = am.update(db).await?;
    info!(contact_id = id, "contact_updated");
    Ok(Some(updated))
}

/// Delete a contact, returning the row as it was before deletion.
#[instrument(skip(db))]
pub async fn delete_contact(db: &DatabaseConnection, id: i32) -> Result<Option<contact::Model>, ServiceError> {
    let Some(found) = get_contact(db, id).await? else {
        debug!(contact_id = id, "contact_delete_missing");
        return Ok(None);
    };
    contact::Entity::delete_by_id(id).exec(db).await?;
    info!(contact_id = id, "contact_deleted");
    Ok(Some(found))
}

/// Contacts whose birthday (month and day) falls in `window`.
#[instrument(skip(db))]
pub async fn list_birthdays_in(db: &DatabaseConnection, window: BirthdayWindow) -> Result<Vec<contact::Model>, ServiceError> {
    let rows = contact::Entity::find()
        .filter(birthday_condition(db.get_database_backend(), &window)?)
        .order_by_asc(contact::Column::Id)
        .all(db)
        .await?;
    debug!(count = rows.len(), "birthdays_listed");
    Ok(rows)
}

/// Contacts matching ANY supplied criterion; no criteria returns everything.
///
/// ASCII terms are matched in SQL. Any non-ASCII term is matched with
/// Unicode case folding in memory, since SQLite `LOWER` folds ASCII only.
#[instrument(skip(db))]
pub async fn search_contacts(db: &DatabaseConnection, criteria: SearchCriteria) -> Result<Vec<contact::Model>, ServiceError> {
    let criteria = criteria.normalized();
    let query = contact::Entity::find().order_by_asc(contact::Column::Id);
    let rows = if criteria.is_empty() {
        query.all(db).await?
    } else if criteria.is_ascii() {
        query.filter(search_condition(&criteria)).all(db).await?
    } else {
        let all = query.all(db).await?;
        debug!(scanned = all.len(), "contacts_search_folded");
        all.into_iter().filter(|c| criteria.matches(c)).collect()
    };
    debug!(count = rows.len(), "contacts_searched");
    Ok(rows)
}

// Month and day of `birth_date` as integers, per backend.
fn month_day_exprs(backend: DatabaseBackend) -> Result<(SimpleExpr, SimpleExpr), ServiceError> {
    match backend {
        DatabaseBackend::Postgres => Ok((
            Expr::cust(r#"CAST(EXTRACT(MONTH FROM "birth_date") AS INTEGER)"#),
            Expr::cust(r#"CAST(EXTRACT(DAY FROM "birth_date") AS INTEGER)"#),
        )),
        DatabaseBackend::Sqlite => Ok((
            Expr::cust(r#"CAST(strftime('%m', "birth_date") AS INTEGER)"#),
            Expr::cust(r#"CAST(strftime('%d', "birth_date") AS INTEGER)"#),
        )),
        DatabaseBackend::MySql => Err(ServiceError::UnsupportedBackend(backend)),
    }
}

pub fn birthday_condition(backend: DatabaseBackend, window: &BirthdayWindow) -> Result<Condition, ServiceError> {
    let (month, day) = month_day_exprs(backend)?;
    let in_window = if window.crosses_month() {
        Condition::any()
            .add(
                Condition::all()
                    .add(Expr::expr(month.clone()).eq(window.start_month as i32))
                    .add(Expr::expr(day.clone()).gte(window.start_day as i32)),
            )
            .add(
                Condition::all()
                    .add(Expr::expr(month).eq(window.end_month as i32))
                    .add(Expr::expr(day).lte(window.end_day as i32)),
            )
    } else {
        Condition::all()
            .add(Expr::expr(month).eq(window.start_month as i32))
            .add(Expr::expr(day).between(window.start_day as i32, window.end_day as i32))
    };
    Ok(Condition::all()
        .add(contact::Column::BirthDate.is_not_null())
        .add(in_window))
}

/// OR of case-insensitive infix matches; callers skip it for empty criteria.
pub fn search_condition(criteria: &SearchCriteria) -> Condition {
    criteria
        .terms()
        .into_iter()
        .fold(Condition::any(), |cond, (col, value)| {
            cond.add(
                Expr::expr(Func::lower(Expr::col((contact::Entity, col))))
                    .like(LikeExpr::new(like_pattern(value)).escape(LIKE_ESCAPE)),
            )
        })
}
