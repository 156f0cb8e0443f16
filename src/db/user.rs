use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::users::dsl::*;
use crate::storage::{CredentialRecord, StorageError};

use super::connection::DbConnection;

#[derive(Debug, Clone, Queryable, Selectable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn fetch_by_username(target: &str, connection: &DbConnection) -> Result<Self, StorageError> {
        let conn = &mut connection.get()?;

        Ok(User::by_username(target)
            .select(User::as_select())
            .get_result(conn)?)
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_username(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(username.eq(target))
    }
}

impl From<User> for CredentialRecord {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            password_hash: value.password,
            created_at: value.created_at,
        }
    }
}
