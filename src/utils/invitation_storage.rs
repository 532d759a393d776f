// src/utils/invitation_storage.rs
use crate::models::{normalize_email, Invitation, InvitationStatus};
use crate::utils::document_store::{
    from_document, from_documents, timestamp, to_document, DocumentStore, Filter, StoreError,
    Update,
};
use chrono::{DateTime, Utc};
use log::info;

const COLLECTION: &str = Invitation::COLLECTION;

// Save a new invitation
pub fn save_invitation(store: &dyn DocumentStore, invitation: &Invitation) -> Result<(), StoreError> {
    store.insert_one(COLLECTION, to_document(COLLECTION, invitation)?)?;
    info!("✅ Saved invitation: {}", invitation.id);
    Ok(())
}

// Find invitation by ID
pub fn find_invitation_by_id(
    store: &dyn DocumentStore,
    invitation_id: &str,
) -> Result<Option<Invitation>, StoreError> {
    store
        .find_by_id(COLLECTION, invitation_id)?
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

// Pending invitations addressed to an email, oldest first
pub fn get_pending_invitations_for_email(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Vec<Invitation>, StoreError> {
    let filter = Filter::new().eq("status", InvitationStatus::Pending.as_str());
    let email = normalize_email(email);

    let docs = store.find(COLLECTION, &filter)?;
    let mut invitations: Vec<Invitation> = from_documents(COLLECTION, docs);
    invitations.retain(|invitation| normalize_email(&invitation.invitee_email) == email);

    invitations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(invitations)
}

/// Moves a pending invitation to `status`. Returns `false` when the stored
/// invitation is no longer pending (or gone), in which case nothing changed.
pub fn resolve_pending_invitation(
    store: &dyn DocumentStore,
    invitation_id: &str,
    status: InvitationStatus,
    responded_at: DateTime<Utc>,
) -> Result<bool, StoreError> {
    let guard = Filter::by_id(invitation_id).eq("status", InvitationStatus::Pending.as_str());
    let update = Update::new()
        .set("status", status.as_str())
        .set("respondedAt", timestamp(responded_at));

    let result = store.update_one(COLLECTION, &guard, &update)?;
    Ok(result.modified_count == 1)
}
