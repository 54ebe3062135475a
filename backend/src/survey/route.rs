use crate::error::SurveyError;
use crate::storage::SurveyStore;
use crate::survey::eligibility::{self, EligibilityPolicy};
use crate::survey::{links, report, responses};
use common::model::view::View;

/// The two surfaces a request can land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Customer form for the given token.
    Survey(String),
    /// Operator dashboard.
    Admin,
}

impl Route {
    pub fn from_link_id(link_id: Option<&str>) -> Self {
        match link_id.map(str::trim) {
            Some(token) if !token.is_empty() => Route::Survey(token.to_string()),
            _ => Route::Admin,
        }
    }
}

/// Builds the view for `route`. The survey route never falls back to the
/// dashboard, even when its token does not resolve.
pub fn render(
    store: &dyn SurveyStore,
    route: &Route,
    policy: EligibilityPolicy,
    public_url: &str,
) -> Result<View, SurveyError> {
    match route {
        Route::Survey(token) => match links::resolve(store, token) {
            Ok(order) => Ok(View::Survey {
                order,
                already_answered: responses::is_answered(store, token)?,
            }),
            Err(SurveyError::LinkNotFound) => Ok(View::InvalidLink {
                message: SurveyError::LinkNotFound.to_string(),
            }),
            Err(e) => Err(e),
        },
        Route::Admin => Ok(View::Dashboard {
            dashboard: report::load_dashboard(store, public_url)?,
            eligible: eligibility::load_eligible(store, policy)?,
        }),
    }
}
