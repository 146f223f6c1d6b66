use crate::domain::errors::CheckoutError;
use crate::domain::events::purchase_types;
use crate::domain::plans::{TokenPlanCatalog, BUYER_PRO_PRICE, SELLER_PLUS_PRICE};
use crate::ports::{CheckoutProvider, CheckoutRequest, CheckoutSession};
use shared_types::Money;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Checkout adapter for a hosted payment page.
///
/// The provider hosts the form and redirects back when the buyer pays, so
/// session creation reduces to minting a session id and building the
/// redirect URL with the metadata the completion webhook will echo.
pub struct HostedCheckoutProvider {
    base_url: String,
    plans: Arc<TokenPlanCatalog>,
}

impl HostedCheckoutProvider {
    pub fn new(base_url: impl Into<String>, plans: Arc<TokenPlanCatalog>) -> Self {
        Self {
            base_url: base_url.into(),
            plans,
        }
    }
}

impl CheckoutProvider for HostedCheckoutProvider {
    fn create_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        if request.account_id.as_str().is_empty() {
            return Err(CheckoutError::MissingAccount);
        }

        let (amount, plan_part): (Money, String) = match request.purchase_type.as_str() {
            purchase_types::TOKENS => {
                let name = request.plan.as_deref().ok_or(CheckoutError::MissingPlan)?;
                let plan = self
                    .plans
                    .resolve(name)
                    .ok_or_else(|| CheckoutError::UnknownPlan(name.to_string()))?;
                (plan.price, format!("&plan={}", plan.name))
            }
            purchase_types::BUYER_PRO => (BUYER_PRO_PRICE, String::new()),
            purchase_types::SELLER_PLUS => (SELLER_PLUS_PRICE, String::new()),
            other => return Err(CheckoutError::UnknownPurchaseType(other.to_string())),
        };

        let session_id = format!("cs_{}", Uuid::new_v4().simple());
        let redirect_url = format!(
            "{}/pay/{}?type={}&account_id={}&amount={}{}",
            self.base_url.trim_end_matches('/'),
            session_id,
            request.purchase_type,
            request.account_id,
            amount.cents(),
            plan_part,
        );

        debug!(session = %session_id, account = %request.account_id, "checkout session created");
        Ok(CheckoutSession {
            session_id,
            redirect_url,
        })
    }
}
