// Shared fixtures for the HTTP-level tests
use std::sync::Mutex;

use crate::models::{
    CreateInvitationRequest, CreateTeamRequest, CreateUserRequest, Invitation, Message,
    SendMessageRequest, Team, User,
};
use crate::services::membership_service;
use crate::utils::document_store::{
    DeleteResult, Document, DocumentStore, Filter, InsertResult, StoreError, Update, UpdateResult,
};
use crate::utils::memory_store::MemoryStore;
use crate::utils::{message_storage, user_storage};

macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(crate::utils::AppState::new($store)))
                .configure(crate::routes::init_routes),
        )
        .await
    };
}
pub(crate) use test_app;

pub fn seed_user(store: &dyn DocumentStore, email: &str, name: &str) -> User {
    let user = User::new(CreateUserRequest {
        email: email.to_string(),
        name: name.to_string(),
        role: None,
        photo_url: None,
    });
    user_storage::insert_user_if_absent(store, &user).unwrap();
    user
}

pub fn seed_team(store: &dyn DocumentStore, name: &str, leader: &User, members: &[&User]) -> Team {
    membership_service::create_team(
        store,
        CreateTeamRequest {
            name: name.to_string(),
            leader: leader.id.clone(),
            members: members.iter().map(|m| m.id.clone()).collect(),
            project: "Apollo".to_string(),
        },
    )
    .unwrap()
}

pub fn seed_invitation(store: &dyn DocumentStore, team: &Team, inviter: &User, invitee: &User) -> Invitation {
    membership_service::create_invitation(
        store,
        CreateInvitationRequest {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            inviter_id: inviter.id.clone(),
            inviter_name: inviter.name.clone(),
            invitee_id: invitee.id.clone(),
            invitee_email: invitee.email.clone(),
            invitee_name: invitee.name.clone(),
        },
    )
    .unwrap()
}

pub fn seed_message(store: &dyn DocumentStore, team: &Team, sender: &User, text: &str) -> Message {
    let message = Message::new(
        &team.id,
        SendMessageRequest {
            message: text.to_string(),
            sender_id: sender.id.clone(),
            sender_name: sender.name.clone(),
            sender_email: sender.email.clone(),
        },
    );
    message_storage::save_message(store, &message).unwrap();
    message
}

pub fn count(store: &dyn DocumentStore, collection: &str, filter: Filter) -> usize {
    store.find(collection, &filter).unwrap().len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert,
    UpdateOne,
    DeleteOne,
    DeleteMany,
}

/// Wraps a `MemoryStore` and fails chosen (operation, collection) pairs.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    faults: Mutex<Vec<(Op, String)>>,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: Op, collection: &str) {
        self.faults.lock().unwrap().push((op, collection.to_string()));
    }

    fn check(&self, op: Op, collection: &str) -> Result<(), StoreError> {
        let faults = self.faults.lock().unwrap();
        if faults.iter().any(|(o, c)| *o == op && c == collection) {
            return Err(StoreError::Unavailable(format!("injected {:?} fault on {}", op, collection)));
        }
        Ok(())
    }
}

impl DocumentStore for FaultyStore {
    fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, StoreError> {
        self.check(Op::Insert, collection)?;
        self.inner.insert_one(collection, doc)
    }

    fn insert_if_none(
        &self,
        collection: &str,
        filter: &Filter,
        doc: Document,
    ) -> Result<Option<InsertResult>, StoreError> {
        self.check(Op::Insert, collection)?;
        self.inner.insert_if_none(collection, filter, doc)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.find_by_id(collection, id)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        self.inner.find(collection, filter)
    }

    fn update_one(&self, collection: &str, filter: &Filter, update: &Update) -> Result<UpdateResult, StoreError> {
        self.check(Op::UpdateOne, collection)?;
        self.inner.update_one(collection, filter, update)
    }

    fn update_many(&self, collection: &str, filter: &Filter, update: &Update) -> Result<UpdateResult, StoreError> {
        self.inner.update_many(collection, filter, update)
    }

    fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        self.check(Op::DeleteOne, collection)?;
        self.inner.delete_one(collection, filter)
    }

    fn delete_many(&self, collection: &str, filter: &Filter) -> Result<DeleteResult, StoreError> {
        self.check(Op::DeleteMany, collection)?;
        self.inner.delete_many(collection, filter)
    }
}
