// src/services/membership_service.rs
//! Every mutation that spans more than one collection goes through here:
//! answering invitations, creating and deleting teams, and the membership and
//! ownership checks used by team chat.
//!
//! Primary writes propagate their errors. Secondary (cascade) steps are
//! caught, logged and reported back in the outcome value instead.
use crate::models::{
    CascadeFailure, CascadeStep, CreateInvitationRequest, CreateTeamRequest, Invitation,
    InvitationResponse, InvitationStatus, Message, Notification, ServiceError, Team,
    TeamDeletionOutcome, UserRole,
};
use crate::utils::document_store::DocumentStore;
use crate::utils::{
    invitation_storage, message_storage, notification_storage, team_storage, user_storage,
};
use chrono::Utc;
use lazy_static::lazy_static;
use log::{error, info, warn};
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

// Team membership check, re-read from the store on every call
pub fn authorize_team_participant(
    store: &dyn DocumentStore,
    team_id: &str,
    user_id: &str,
) -> Result<Team, ServiceError> {
    let team = match team_storage::find_team_by_id(store, team_id)? {
        Some(team) => team,
        None => {
            error!("❌ Team not found: {}", team_id);
            return Err(ServiceError::NotFound("Team not found".to_string()));
        }
    };

    if !team.is_participant(user_id) {
        error!("❌ User: {} is not a member of team: {}", user_id, team_id);
        return Err(ServiceError::Forbidden(
            "You are not a member of this team".to_string(),
        ));
    }

    Ok(team)
}

/// Edit and delete both need the caller to still be in the message's team
/// and to be its sender. Team leaders get no override.
pub fn authorize_message_sender(
    store: &dyn DocumentStore,
    message_id: &str,
    user_id: &str,
) -> Result<Message, ServiceError> {
    let message = match message_storage::find_message_by_id(store, message_id)? {
        Some(message) => message,
        None => {
            error!("❌ Message not found: {}", message_id);
            return Err(ServiceError::NotFound("Message not found".to_string()));
        }
    };

    authorize_team_participant(store, &message.team_id, user_id)?;

    if message.sender_id != user_id {
        error!("❌ User: {} does not own message: {}", user_id, message_id);
        return Err(ServiceError::Forbidden(
            "You can only modify your own messages".to_string(),
        ));
    }

    Ok(message)
}

pub fn create_team(store: &dyn DocumentStore, request: CreateTeamRequest) -> Result<Team, ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::BadRequest("Team name is required".to_string()));
    }
    if request.leader.trim().is_empty() {
        return Err(ServiceError::BadRequest("Team leader is required".to_string()));
    }

    let team = Team::new(request);
    team_storage::save_team(store, &team)?;

    // Best effort, mirrors the reversion on delete
    match user_storage::set_role_by_id(store, &team.leader, UserRole::Leader) {
        Ok(result) if result.matched_count == 0 => {
            warn!("⚠️ Leader {} of team {} has no user record", team.leader, team.id)
        }
        Ok(_) => info!("✅ User: {} promoted to leader", team.leader),
        Err(e) => error!("❌ Failed to promote leader {}: {}", team.leader, e),
    }

    info!("✅ Team created successfully: {}", team.id);
    Ok(team)
}

pub fn create_invitation(
    store: &dyn DocumentStore,
    request: CreateInvitationRequest,
) -> Result<Invitation, ServiceError> {
    if !is_valid_email(&request.invitee_email) {
        return Err(ServiceError::BadRequest(format!(
            "Invalid invitee email: {}",
            request.invitee_email
        )));
    }

    let required = [
        ("teamId", &request.team_id),
        ("inviterId", &request.inviter_id),
        ("inviteeId", &request.invitee_id),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ServiceError::BadRequest(format!("{} is required", field)));
    }

    let invitation = Invitation::new(request);
    invitation_storage::save_invitation(store, &invitation)?;

    info!(
        "📧 Invitation {} created for {} to team {}",
        invitation.id, invitation.invitee_email, invitation.team_id
    );
    Ok(invitation)
}

pub fn accept_invitation(store: &dyn DocumentStore, invitation_id: &str) -> Result<InvitationResponse, ServiceError> {
    respond_to_invitation(store, invitation_id, InvitationStatus::Accepted)
}

pub fn decline_invitation(store: &dyn DocumentStore, invitation_id: &str) -> Result<InvitationResponse, ServiceError> {
    respond_to_invitation(store, invitation_id, InvitationStatus::Declined)
}

fn respond_to_invitation(
    store: &dyn DocumentStore,
    invitation_id: &str,
    status: InvitationStatus,
) -> Result<InvitationResponse, ServiceError> {
    info!("🔄 Responding to invitation {}: {:?}", invitation_id, status);

    let mut invitation = match invitation_storage::find_invitation_by_id(store, invitation_id)? {
        Some(inv) => inv,
        None => {
            error!("❌ Invitation not found: {}", invitation_id);
            return Err(ServiceError::NotFound("Invitation not found".to_string()));
        }
    };

    if !invitation.is_pending() {
        warn!("⚠️ Invitation {} already {}", invitation_id, invitation.status.as_str());
        return Err(already_resolved(invitation.status));
    }

    let verb = if status == InvitationStatus::Accepted { "accept" } else { "decline" };
    let responded_at = Utc::now();

    // Compare-and-swap on `pending`: of two racing responses only one gets past here
    let transitioned = invitation_storage::resolve_pending_invitation(store, invitation_id, status, responded_at)
        .map_err(|e| {
            error!("❌ Error updating invitation {} to {}: {}", invitation_id, status.as_str(), e);
            ServiceError::InternalServerError(format!("Failed to {} invitation", verb))
        })?;

    if !transitioned {
        let current = invitation_storage::find_invitation_by_id(store, invitation_id)?
            .map(|inv| inv.status)
            .unwrap_or(invitation.status);
        warn!("⚠️ Invitation {} resolved concurrently as {}", invitation_id, current.as_str());
        return Err(already_resolved(current));
    }

    invitation.status = status;
    invitation.responded_at = Some(responded_at);

    let mut secondary_failures = Vec::new();
    let mut member_added = None;

    if status == InvitationStatus::Accepted {
        // Invitation stays accepted if this fails; no rollback
        let result = team_storage::add_team_member(store, &invitation.team_id, &invitation.invitee_id)
            .map_err(|e| {
                error!(
                    "❌ Invitation {} accepted but adding {} to team {} failed: {}",
                    invitation_id, invitation.invitee_id, invitation.team_id, e
                );
                ServiceError::InternalServerError("Failed to accept invitation".to_string())
            })?;

        if result.matched_count == 0 {
            warn!(
                "⚠️ Team {} no longer exists, invitee {} not added",
                invitation.team_id, invitation.invitee_id
            );
            secondary_failures.push(CascadeFailure::new(
                CascadeStep::AddMember,
                format!("Team {} not found", invitation.team_id),
            ));
            member_added = Some(false);
        } else {
            info!("✅ User: {} added to team: {}", invitation.invitee_id, invitation.team_id);
            member_added = Some(true);
        }
    }

    let notification_sent = match Notification::invitation_response(&invitation) {
        Some(notification) => match notification_storage::save_notification(store, &notification) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "❌ Failed to notify {} about invitation {}: {}",
                    invitation.inviter_id, invitation_id, e
                );
                secondary_failures.push(CascadeFailure::new(CascadeStep::SendNotification, e.to_string()));
                false
            }
        },
        None => false,
    };

    info!("✅ Invitation {} {}", invitation_id, status.as_str());

    Ok(InvitationResponse {
        id: invitation.id,
        status,
        message: format!("Invitation {} successfully", status.as_str()),
        member_added,
        notification_sent,
        secondary_failures,
    })
}

fn already_resolved(status: InvitationStatus) -> ServiceError {
    ServiceError::Conflict(format!("Invitation is already {}", status.as_str()))
}

/// Deletes the team, its messages, and reverts the leader's role.
///
/// Only the team lookup and the team delete itself can fail the call; message
/// cleanup and role reversion failures end up in `secondary_failures`.
pub fn delete_team(store: &dyn DocumentStore, team_id: &str) -> Result<TeamDeletionOutcome, ServiceError> {
    info!("🗑️ Deleting team: {}", team_id);

    let team = match team_storage::find_team_by_id(store, team_id)? {
        Some(team) => team,
        None => {
            error!("❌ Team not found: {}", team_id);
            return Err(ServiceError::NotFound("Team not found".to_string()));
        }
    };

    let mut secondary_failures = Vec::new();

    let (messages_deleted, deleted_message_count) = match message_storage::delete_team_messages(store, team_id) {
        Ok(result) => {
            info!("✅ Deleted {} messages for team: {}", result.deleted_count, team_id);
            (true, result.deleted_count)
        }
        Err(e) => {
            error!("❌ Failed to delete messages for team {}: {}", team_id, e);
            secondary_failures.push(CascadeFailure::new(CascadeStep::DeleteMessages, e.to_string()));
            (false, 0)
        }
    };

    let deleted = team_storage::delete_team(store, team_id).map_err(|e| {
        error!("❌ Failed to delete team {}: {}", team_id, e);
        ServiceError::InternalServerError("Failed to delete team".to_string())
    })?;
    if deleted.deleted_count == 0 {
        // Removed by a concurrent request between lookup and delete
        return Err(ServiceError::NotFound("Team not found".to_string()));
    }

    let mut leader_role_reverted = false;
    if !team.leader.is_empty() {
        match user_storage::set_role_by_id(store, &team.leader, UserRole::Member) {
            Ok(result) if result.matched_count == 1 => {
                info!("✅ Leader {} reverted to member", team.leader);
                leader_role_reverted = true;
            }
            Ok(_) => {
                warn!("⚠️ Leader {} of deleted team {} not found", team.leader, team_id);
                secondary_failures.push(CascadeFailure::new(
                    CascadeStep::RevertLeaderRole,
                    format!("User {} not found", team.leader),
                ));
            }
            Err(e) => {
                error!("❌ Failed to revert role of leader {}: {}", team.leader, e);
                secondary_failures.push(CascadeFailure::new(CascadeStep::RevertLeaderRole, e.to_string()));
            }
        }
    }

    let message = if secondary_failures.is_empty() {
        "Team deleted successfully"
    } else {
        warn!(
            "⚠️ Team {} deleted with {} cascade failure(s)",
            team_id,
            secondary_failures.len()
        );
        "Team deleted with cascade residue"
    };

    Ok(TeamDeletionOutcome {
        team_id: team.id,
        deleted: true,
        messages_deleted,
        deleted_message_count,
        leader_role_reverted,
        secondary_failures,
        message: message.to_string(),
    })
}
