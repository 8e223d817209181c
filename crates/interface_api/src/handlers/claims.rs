//! Claims handlers
//!
//! Successful writes and recoverable failures answer with a 303 redirect
//! whose JSON body carries the flash message.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use core_kernel::{ClaimId, Money};
use domain_claims::{ClaimError, ClaimStatus, NewClaim, Role, UploadedDocument};

use crate::auth::CurrentUser;
use crate::dto::claims::{ClaimForm, ClaimResponse, FlashResponse};
use crate::policy::{authorize, ClaimAction};
use crate::{error::ApiError, AppState};

pub const CLAIMS_PATH: &str = "/api/v1/claims";
pub const HOME_PATH: &str = "/";
pub const COORDINATOR_DASHBOARD_PATH: &str = "/api/v1/dashboard/coordinator";
pub const MANAGER_DASHBOARD_PATH: &str = "/api/v1/dashboard/manager";

/// A review action and the status it moves a claim to
struct Review {
    action: ClaimAction,
    target: ClaimStatus,
    verb: &'static str,
}

const VERIFY: Review = Review {
    action: ClaimAction::Verify,
    target: ClaimStatus::VerifiedByCoordinator,
    verb: "verified",
};

const APPROVE: Review = Review {
    action: ClaimAction::Approve,
    target: ClaimStatus::ApprovedByManager,
    verb: "approved",
};

const REJECT: Review = Review {
    action: ClaimAction::Reject,
    target: ClaimStatus::Rejected,
    verb: "rejected",
};

/// Lists the caller's claims (lecturers) or their review queue (reviewers)
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    authorize(&user, ClaimAction::Index)?;

    let claims = match user.role {
        Role::Lecturer => state.service.get_claims_for_user(&user.user_id).await?,
        reviewer => state.service.get_pending_claims(reviewer).await?,
    };
    let claims = claims
        .into_iter()
        .map(ClaimResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(claims))
}

/// Submits a claim from a multipart form
///
/// Fields: `hours_worked`, `hourly_rate`, `notes` (optional) and the
/// `document` file.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    authorize(&user, ClaimAction::Create)?;

    let submission = read_submission(multipart).await?;
    submission.form.validate().map_err(validation_error)?;

    let form = submission.form;
    let mut claim = NewClaim::new(
        user.user_id.clone(),
        form.hours_worked,
        Money::new(form.hourly_rate, state.config.currency),
    );
    if let Some(notes) = form.notes.filter(|n| !n.trim().is_empty()) {
        claim = claim.with_notes(notes);
    }

    let id = state.service.create_claim(claim, submission.document).await?;
    Ok(redirect(FlashResponse::success(
        CLAIMS_PATH,
        format!("Claim {} submitted successfully", id),
    )))
}

/// Shows one claim; lecturers only see their own
pub async fn view_details(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    authorize(&user, ClaimAction::ViewDetails)?;
    let id = parse_claim_id(&id)?;

    let visible = state
        .service
        .get_claim_by_id(id)
        .await?
        .filter(|claim| user.role != Role::Lecturer || claim.is_owned_by(&user.user_id));

    match visible {
        Some(claim) => Ok(Json(ClaimResponse::try_from(claim)?).into_response()),
        None => Ok(redirect(FlashResponse::error(HOME_PATH, "Claim not found"))),
    }
}

/// Coordinator verification
pub async fn verify(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    review(&state, &user, &id, &VERIFY).await
}

/// Manager approval
pub async fn approve(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    review(&state, &user, &id, &APPROVE).await
}

/// Rejection by either reviewer
pub async fn reject(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    review(&state, &user, &id, &REJECT).await
}

async fn review(
    state: &AppState,
    user: &CurrentUser,
    raw_id: &str,
    review: &Review,
) -> Result<Response, ApiError> {
    authorize(user, review.action)?;
    let id = parse_claim_id(raw_id)?;
    let Review { target, verb, .. } = *review;

    let dashboard = dashboard_path(user.role);

    match state.service.update_claim_status(id, target).await {
        Ok(_) => {
            info!(claim_id = %id, reviewer = %user.user_id, status = %target, "Claim reviewed");
            Ok(redirect(FlashResponse::success(
                dashboard,
                format!("Claim {} {} successfully", id, verb),
            )))
        }
        Err(ClaimError::ClaimNotFound(_)) => {
            Ok(redirect(FlashResponse::error(dashboard, "Claim not found")))
        }
        Err(e @ (ClaimError::InvalidStatusTransition { .. }
        | ClaimError::ConcurrentModification(_))) => {
            warn!(claim_id = %id, error = %e, "Review refused");
            Ok(redirect(FlashResponse::error(dashboard, e.to_string())))
        }
        Err(e) => Err(e.into()),
    }
}

/// Accepts `42` or `CLM-42`
fn parse_claim_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse::<ClaimId>()
        .ok()
        .filter(ClaimId::is_assigned)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid claim id: {}", raw)))
}

fn dashboard_path(role: Role) -> &'static str {
    match role {
        Role::Coordinator => COORDINATOR_DASHBOARD_PATH,
        Role::Manager => MANAGER_DASHBOARD_PATH,
        Role::Lecturer => CLAIMS_PATH,
    }
}

fn redirect(flash: FlashResponse) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, flash.redirect_to.clone())],
        Json(flash),
    )
        .into_response()
}

struct Submission {
    form: ClaimForm,
    document: Option<UploadedDocument>,
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut hours_worked = None;
    let mut hourly_rate = None;
    let mut notes = None;
    let mut document = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "hours_worked" => hours_worked = Some(field.text().await?),
            "hourly_rate" => hourly_rate = Some(field.text().await?),
            "notes" => notes = Some(field.text().await?),
            "document" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let content = field.bytes().await?;
                // An empty file input still sends a part
                if !file_name.is_empty() || !content.is_empty() {
                    document = Some(UploadedDocument::new(file_name, content_type, content.to_vec()));
                }
            }
            other => warn!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(Submission {
        form: ClaimForm {
            hours_worked: parse_decimal(hours_worked, "Hours worked")?,
            hourly_rate: parse_decimal(hourly_rate, "Hourly rate")?,
            notes,
        },
        document,
    })
}

fn parse_decimal(raw: Option<String>, label: &str) -> Result<Decimal, ApiError> {
    let raw = raw
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("{} is required", label)))?;
    raw.trim()
        .parse()
        .map_err(|_| ApiError::Validation(format!("{} must be a number", label)))
}

fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ");
    ApiError::Validation(message)
}
