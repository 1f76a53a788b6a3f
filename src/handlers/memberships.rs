use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::membership::{MemberProfile, MemberRoster, MembershipView};
use crate::errors::AppError;
use crate::session::Session;
use crate::AppState;

use super::catalog::ShopResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MembershipResponse {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub email: String,
    /// Linked profile, once the invited email registers.
    pub user_id: Option<Uuid>,
    pub created_at: String,
}

impl From<MembershipView> for MembershipResponse {
    fn from(m: MembershipView) -> Self {
        MembershipResponse {
            id: m.id,
            shop_id: m.shop_id,
            email: m.email,
            user_id: m.user_id,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberProfileResponse {
    pub user_id: Uuid,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact_number: String,
    pub college: Option<String>,
    pub program: Option<String>,
    pub year: i32,
    pub section: i32,
}

impl From<MemberProfile> for MemberProfileResponse {
    fn from(p: MemberProfile) -> Self {
        MemberProfileResponse {
            user_id: p.user_id,
            student_number: p.student_number,
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            contact_number: p.contact_number,
            college: p.college,
            program: p.program,
            year: p.year,
            section: p.section,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResponse {
    pub members: Vec<MemberProfileResponse>,
    /// Invited emails no profile has claimed yet.
    pub unregistered_emails: Vec<String>,
}

impl From<MemberRoster> for RosterResponse {
    fn from(r: MemberRoster) -> Self {
        RosterResponse {
            members: r.members.into_iter().map(Into::into).collect(),
            unregistered_emails: r.unregistered_emails,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /memberships
///
/// Lists the shops the caller is a member of, matched by user id or by
/// the email the invite was sent to.
#[utoipa::path(
    get,
    path = "/memberships",
    responses(
        (status = 200, description = "Shops the caller is a member of", body = Vec<ShopResponse>),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "memberships"
)]
pub async fn my_memberships(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let shops = web::block(move || state.memberships.my_memberships(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ShopResponse> = shops.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /managed-shops
///
/// Lists the shops the caller is an officer of.
#[utoipa::path(
    get,
    path = "/managed-shops",
    responses(
        (status = 200, description = "Shops the caller manages", body = Vec<ShopResponse>),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "memberships"
)]
pub async fn managed_shops(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let shops = web::block(move || state.memberships.managed_shops(&session))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ShopResponse> = shops.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /shops/{shop_id}/memberships
///
/// Returns the shop's member roster: registered members with their
/// profiles plus invited emails that have not registered yet. Officers
/// only.
#[utoipa::path(
    get,
    path = "/shops/{shop_id}/memberships",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    responses(
        (status = 200, description = "Member roster of the shop", body = RosterResponse),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "memberships"
)]
pub async fn shop_roster(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();

    let roster = web::block(move || state.memberships.roster(&session, shop_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(RosterResponse::from(roster)))
}

/// POST /shops/{shop_id}/memberships
///
/// Invites a member by email. The invite is linked to a profile right
/// away when one exists for that email; otherwise it links on
/// registration. Officers only; duplicate invites are rejected.
#[utoipa::path(
    post,
    path = "/shops/{shop_id}/memberships",
    params(
        ("shop_id" = Uuid, Path, description = "Shop UUID"),
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Membership created", body = MembershipResponse),
        (status = 400, description = "Empty email"),
        (status = 401, description = "Missing or invalid session headers"),
        (status = 403, description = "Caller is not an officer of the shop"),
        (status = 409, description = "The email is already a member"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "memberships"
)]
pub async fn add_member(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<AddMemberRequest>,
) -> Result<HttpResponse, AppError> {
    let shop_id = path.into_inner();
    let email = body.into_inner().email;

    let membership = web::block(move || state.memberships.add_member(&session, shop_id, &email))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(MembershipResponse::from(membership)))
}
