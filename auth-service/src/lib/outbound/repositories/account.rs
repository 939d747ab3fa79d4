use async_trait::async_trait;
use auth::Role;
use mongodb::bson::doc;
use mongodb::bson::DateTime;
use mongodb::error::ErrorKind;
use mongodb::error::WriteFailure;
use mongodb::options::FindOneAndUpdateOptions;
use mongodb::options::IndexOptions;
use mongodb::Client;
use mongodb::Collection;
use mongodb::IndexModel;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::AccountRepository;

const DATABASE: &str = "userdb";

/// Document shape stored in `userdb.users`.
///
/// The password hash lives under `password` and the audit token under
/// `token`, matching what the user service reads from the same collection.
#[derive(Debug, Serialize, Deserialize)]
struct AccountDocument {
    username: String,
    name: String,
    password: String,
    age: i64,
    address: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    created_at: DateTime,
    updated_at: DateTime,
}

#[derive(Debug, Serialize, Deserialize)]
struct BootstrapMarker {
    #[serde(rename = "_id")]
    id: String,
    claimed_by: String,
    claimed_at: DateTime,
}

impl From<Account> for AccountDocument {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            name: account.name,
            password: account.password_hash,
            age: account.age,
            address: account.address,
            role: account.role,
            token: account.last_issued_token,
            created_at: DateTime::from_chrono(account.created_at),
            updated_at: DateTime::from_chrono(account.updated_at),
        }
    }
}

impl From<AccountDocument> for Account {
    fn from(document: AccountDocument) -> Self {
        Self {
            username: document.username,
            name: document.name,
            age: document.age,
            address: document.address,
            role: document.role,
            password_hash: document.password,
            last_issued_token: document.token,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

pub struct MongoAccountRepository {
    accounts: Collection<AccountDocument>,
    meta: Collection<BootstrapMarker>,
}

impl MongoAccountRepository {
    pub fn new(client: &Client) -> Self {
        let database = client.database(DATABASE);
        Self {
            accounts: database.collection("users"),
            meta: database.collection("meta"),
        }
    }

    /// Unique index on username; backs the duplicate-registration guard
    /// under concurrency.
    pub async fn ensure_indexes(&self) -> Result<(), AccountError> {
        let model = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.accounts
            .create_index(model, None)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

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
impl AccountRepository for MongoAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let document = self
            .accounts
            .find_one(doc! { "username": username }, None)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(document.map(Account::from))
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let username = account.username.clone();
        let document = AccountDocument::from(account.clone());

        self.accounts.insert_one(&document, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AccountError::DuplicateUsername(username.clone())
            } else {
                AccountError::DatabaseError(e.to_string())
            }
        })?;

        Ok(account)
    }

    async fn claim_bootstrap_admin(&self, username: &str) -> Result<bool, AccountError> {
        // Upsert a singleton marker; the pre-image is None for exactly the
        // caller that created it, which is the winner of the claim.
        let options = FindOneAndUpdateOptions::builder().upsert(true).build();

        let previous = self
            .meta
            .find_one_and_update(
                doc! { "_id": "first_admin" },
                doc! { "$setOnInsert": {
                    "claimed_by": username,
                    "claimed_at": DateTime::now(),
                }},
                options,
            )
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(previous.is_none())
    }

    async fn release_bootstrap_admin(&self, username: &str) -> Result<(), AccountError> {
        // Filtered on claimed_by so only the claim's own loser path can
        // release it, never a concurrent registration's.
        self.meta
            .delete_one(
                doc! { "_id": "first_admin", "claimed_by": username },
                None,
            )
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn record_issued_token(&self, username: &str, token: &str) -> Result<(), AccountError> {
        self.accounts
            .update_one(
                doc! { "username": username },
                doc! { "$set": { "token": token, "updated_at": DateTime::now() } },
                None,
            )
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
