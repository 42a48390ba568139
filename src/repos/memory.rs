//! In-memory `UserRepo` for resolver and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{AddressRecord, NewUser, UserRecord, UserRepo};
use crate::services::pagination::PageRequest;

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryUserRepo {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepoError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<UserRecord>, i64), RepoError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let count = users.len() as i64;

        let page_users = users
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit.map_or(usize::MAX, |l| l as usize))
            .collect();

        Ok((page_users, count))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(RepoError::Conflict);
        }

        let id = Uuid::new_v4();
        let now = Utc::now();
        let addresses = new_user
            .addresses
            .into_iter()
            .map(|a| AddressRecord {
                id: Uuid::new_v4(),
                user_id: id,
                label: a.label,
                cep: a.cep,
                street: a.street,
                street_number: a.street_number,
                complement: a.complement,
                neighborhood: a.neighborhood,
                city: a.city,
                state: a.state,
            })
            .collect();

        let user = UserRecord {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            birth_date: new_user.birth_date,
            created_at: now,
            updated_at: now,
            addresses,
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut users = self.users.lock().unwrap();
        let removed = users.len() as u64;
        users.clear();

        Ok(removed)
    }
}
