use crate::error::{PortfolioError, Result};
use crate::view::ContactElements;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::{info, warn};

pub const STATUS_NOT_CONFIGURED: &str =
    "Form not configured yet. Add your Formspree endpoint in the FORMSPREE_ENDPOINT setting.";
pub const STATUS_SENDING: &str = "Sending…";
pub const STATUS_SENT: &str = "Message sent. Thank you!";
pub const STATUS_FAILED: &str = "Could not send message. Please try again later.";

/// Flat form payload: field name to value.
pub type FormData = BTreeMap<String, String>;

/// Delivers a submitted form to the relay endpoint.
#[async_trait]
pub trait FormRelay: Send + Sync {
    async fn send(&self, endpoint: &str, data: &FormData) -> Result<()>;
}

/// Posts form data as JSON with reqwest.
pub struct HttpFormRelay {
    client: Client,
}

impl HttpFormRelay {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        HttpFormRelay { client }
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    async fn send(&self, endpoint: &str, data: &FormData) -> Result<()> {
        let response = self
            .client
            .post(endpoint)
            .header("Accept", "application/json")
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortfolioError::RelayError(status));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Failed,
    NotConfigured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Sending,
    Settled(Outcome),
}

/// Drives the contact form: one relay attempt per submission.
///
/// `submit` takes `&mut self`, so submissions from one controller run one
/// after another and each of them is sent.
pub struct ContactFormController<R> {
    endpoint: String,
    relay: R,
    elements: ContactElements,
    state: FormState,
}

impl<R: FormRelay> ContactFormController<R> {
    pub fn new(endpoint: impl Into<String>, relay: R, elements: ContactElements) -> Self {
        Self {
            endpoint: endpoint.into(),
            relay,
            elements,
            state: FormState::Idle,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Handles one form submission and returns the settled state.
    ///
    /// Without a form element there is nothing to submit and the state is
    /// returned unchanged.
    pub async fn submit(&mut self) -> FormState {
        if self.elements.form.is_none() {
            return self.state;
        }

        if self.endpoint.trim().is_empty() {
            warn!("Contact form submitted but no relay endpoint is configured");
            self.set_status(STATUS_NOT_CONFIGURED);
            self.state = FormState::Settled(Outcome::NotConfigured);
            return self.state;
        }

        let data: FormData = self
            .elements
            .form
            .as_ref()
            .map(|form| form.entries().into_iter().collect())
            .unwrap_or_default();
        self.set_status(STATUS_SENDING);
        self.state = FormState::Sending;

        let result = self.relay.send(&self.endpoint, &data).await;
        let outcome = match result {
            Ok(()) => {
                info!("Contact form delivered ({} fields)", data.len());
                if let Some(form) = self.elements.form.as_mut() {
                    form.reset();
                }
                self.set_status(STATUS_SENT);
                Outcome::Sent
            }
            Err(e) => {
                warn!("Contact form delivery failed: {}", e);
                self.set_status(STATUS_FAILED);
                Outcome::Failed
            }
        };

        self.state = FormState::Settled(outcome);
        self.state
    }

    fn set_status(&mut self, text: &str) {
        if let Some(status) = self.elements.status.as_mut() {
            status.set_text(text);
        }
    }
}
