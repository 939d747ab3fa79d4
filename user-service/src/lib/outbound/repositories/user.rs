use async_trait::async_trait;
use auth::Role;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::DateTime;
use mongodb::error::ErrorKind;
use mongodb::error::WriteFailure;
use mongodb::options::FindOptions;
use mongodb::options::IndexOptions;
use mongodb::Client;
use mongodb::Collection;
use mongodb::IndexModel;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::UserError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::UserRepository;

const DATABASE: &str = "userdb";

/// Document shape stored in `userdb.users`, the same collection the
/// credential issuer registers into. The `token` field belongs to the
/// issuer; this service preserves it on updates by never writing it.
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    username: String,
    name: String,
    password: String,
    age: i64,
    address: String,
    role: Role,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<Account> for UserDocument {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            name: account.name,
            password: account.password_hash,
            age: account.age,
            address: account.address,
            role: account.role,
            created_at: DateTime::from_chrono(account.created_at),
            updated_at: DateTime::from_chrono(account.updated_at),
        }
    }
}

impl From<UserDocument> for Account {
    fn from(document: UserDocument) -> Self {
        Self {
            username: document.username,
            name: document.name,
            age: document.age,
            address: document.address,
            role: document.role,
            password_hash: document.password,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

pub struct MongoUserRepository {
    users: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub fn new(client: &Client) -> Self {
        let database = client.database(DATABASE);
        Self {
            users: database.collection("users"),
        }
    }

    /// Unique index on username; shared with the credential issuer, so
    /// creating it twice is a no-op.
    pub async fn ensure_indexes(&self) -> Result<(), UserError> {
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users
            .create_index(model, None)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match &*e.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, account: Account) -> Result<Account, UserError> {
        let username = account.username.clone();
        let document = UserDocument::from(account.clone());

        self.users.insert_one(&document, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                UserError::DuplicateUsername(username.clone())
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, UserError> {
        let document = self
            .users
            .find_one(doc! { "username": username }, None)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(document.map(Account::from))
    }

    async fn list_all(&self) -> Result<Vec<Account>, UserError> {
        let options = FindOptions::builder().sort(doc! { "username": 1 }).build();

        let cursor = self
            .users
            .find(doc! {}, options)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let documents: Vec<UserDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(documents.into_iter().map(Account::from).collect())
    }

    async fn update(&self, account: Account) -> Result<Account, UserError> {
        let role = mongodb::bson::to_bson(&account.role)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let result = self
            .users
            .update_one(
                doc! { "username": &account.username },
                doc! { "$set": {
                    "name": &account.name,
                    "password": &account.password_hash,
                    "age": account.age,
                    "address": &account.address,
                    "role": role,
                    "updated_at": DateTime::from_chrono(account.updated_at),
                }},
                None,
            )
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound(account.username));
        }

        Ok(account)
    }

    async fn delete(&self, username: &str) -> Result<(), UserError> {
        let result = self
            .users
            .delete_one(doc! { "username": username }, None)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(UserError::NotFound(username.to_string()));
        }

        Ok(())
    }
}
