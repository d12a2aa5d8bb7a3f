//! Category store - user-scoped CRUD plus default-set seeding.
//!
//! Categories classify transactions and anchor monthly budgets. Uniqueness
//! of `(name, user, type)` is enforced by the store itself so concurrent
//! creators racing for the same name resolve to a conflict, never a
//! duplicate row.

use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use tracing::info;

use crate::{
    config::categories::DefaultCategories,
    entities::{Category, FlowType, User, category},
    errors::{Error, Result},
};

/// Data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning user
    pub user_id: i64,
    /// Category name
    pub name: String,
    /// Income or expense
    pub flow_type: FlowType,
}

/// Lists a user's categories ordered by name, optionally restricted to one
/// flow type.
pub async fn list_categories(
    db: &DatabaseConnection,
    user_id: i64,
    flow_type: Option<FlowType>,
) -> Result<Vec<category::Model>> {
    let mut query = Category::find().filter(category::Column::UserId.eq(user_id));

    if let Some(flow_type) = flow_type {
        query = query.filter(category::Column::FlowType.eq(flow_type));
    }

    query
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by id, scoped to its owner. Returns `None` when the
/// row does not exist or belongs to someone else.
pub async fn get_category(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(id)
        .filter(category::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category. A second category with the same name, type, and
/// owner fails with [`Error::DuplicateCategory`]; the existing row is
/// unaffected.
pub async fn create_category(
    db: &DatabaseConnection,
    data: NewCategory,
) -> Result<category::Model> {
    let model = category::ActiveModel {
        name: Set(data.name.clone()),
        flow_type: Set(data.flow_type),
        user_id: Set(data.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(Error::DuplicateCategory { name: data.name })
            }
            _ => Err(err.into()),
        },
    }
}

/// Renames a category. The flow type is fixed at creation. Returns `None`
/// when the row does not exist or is owned by another user.
pub async fn update_category(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
    name: String,
) -> Result<Option<category::Model>> {
    let Some(existing) = Category::find_by_id(id)
        .filter(category::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(name);

    let updated = active.update(db).await?;
    Ok(Some(updated))
}

/// Deletes a category scoped to its owner. The schema's referential
/// actions null the reference on dependent transactions and cascade the
/// delete to dependent budgets. Deleting a missing row is a no-op.
pub async fn delete_category(db: &DatabaseConnection, id: i64, user_id: i64) -> Result<()> {
    Category::delete_many()
        .filter(category::Column::Id.eq(id))
        .filter(category::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Seeds the default category set for a freshly registered user, skipping
/// names the user already has. Returns the number of categories created.
///
/// # Errors
/// Returns [`Error::UserNotFound`] if `user_id` does not resolve.
pub async fn seed_default_categories(
    db: &DatabaseConnection,
    user_id: i64,
    defaults: &DefaultCategories,
) -> Result<usize> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let mut created = 0;
    let groups = [
        (FlowType::Income, &defaults.income),
        (FlowType::Expense, &defaults.expense),
    ];

    for (flow_type, names) in groups {
        for name in names {
            let result = create_category(
                db,
                NewCategory {
                    user_id,
                    name: name.clone(),
                    flow_type,
                },
            )
            .await;

            match result {
                Ok(_) => created += 1,
                // Already seeded or user-created earlier; leave it alone
                Err(Error::DuplicateCategory { .. }) => {}
                Err(err) => return Err(err),
            }
        }
    }

    info!("Seeded {created} default categories for user {user_id}");
    Ok(created)
}
