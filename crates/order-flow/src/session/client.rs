//! Cloneable async client for the session actor.

use super::message::{Reply, SessionRequest, UserEvent};
use crate::error::ActorError;
use crate::model::UserId;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    /// Applies one user event and returns the reply to render.
    pub async fn handle(&self, user_id: UserId, event: UserEvent) -> Result<Reply, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Handle {
                user_id,
                event,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)
    }
}
