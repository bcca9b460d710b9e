//! Stdin/stdout stand-in for a platform connection.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use crossbot_channels::{
    ChannelError, Delivery, InboundInteraction, InboundMessage, InteractionTarget, Renderer,
    Router,
};
use crossbot_core::Platform;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

pub const CONSOLE_CHANNEL: &str = "console";
const PRESS_PREFIX: &str = "!press";

/// Prints every delivery call as one JSON line on stdout.
pub struct ConsoleDelivery<P> {
    /// Set once a message exists that a button press could refer to.
    posted: AtomicBool,
    _payload: PhantomData<fn() -> P>,
}

impl<P> ConsoleDelivery<P> {
    pub fn new() -> Self {
        Self {
            posted: AtomicBool::new(false),
            _payload: PhantomData,
        }
    }

    fn require_message(&self, target: &InteractionTarget) -> Result<(), ChannelError> {
        if self.posted.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(ChannelError::NotFound(target.message_id.clone()))
        }
    }
}

impl<P> Default for ConsoleDelivery<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(op: &str, body: Value) -> Result<(), ChannelError> {
    let line = serde_json::to_string(&json!({ "op": op, "body": body }))
        .map_err(|e| ChannelError::SendFailed(e.to_string()))?;
    println!("{}", line);
    Ok(())
}

fn to_value<P: Serialize>(payload: &P) -> Result<Value, ChannelError> {
    serde_json::to_value(payload).map_err(|e| ChannelError::SendFailed(e.to_string()))
}

#[async_trait]
impl<P> Delivery for ConsoleDelivery<P>
where
    P: Serialize + Send + Sync,
{
    type Payload = P;

    async fn create_message(
        &self,
        channel_id: &str,
        reply_to: Option<&str>,
        payload: &P,
    ) -> Result<(), ChannelError> {
        emit(
            "create_message",
            json!({
                "channel_id": channel_id,
                "reply_to": reply_to,
                "payload": to_value(payload)?,
            }),
        )?;
        self.posted.store(true, Ordering::Release);
        Ok(())
    }

    async fn edit_message(&self, target: &InteractionTarget, payload: &P) -> Result<(), ChannelError> {
        self.require_message(target)?;
        emit(
            "edit_message",
            json!({ "message_id": target.message_id, "payload": to_value(payload)? }),
        )
    }

    async fn delete_message(&self, target: &InteractionTarget) -> Result<(), ChannelError> {
        self.require_message(target)?;
        emit("delete_message", json!({ "message_id": target.message_id }))
    }

    async fn show_alert(&self, target: &InteractionTarget, text: &str) -> Result<(), ChannelError> {
        emit(
            "show_alert",
            json!({ "interaction_id": target.interaction_id, "text": text }),
        )
    }

    async fn open_prompt(&self, target: &InteractionTarget, prefill: &str) -> Result<(), ChannelError> {
        emit(
            "open_prompt",
            json!({ "interaction_id": target.interaction_id, "prefill": prefill }),
        )
    }

    async fn acknowledge(&self, target: &InteractionTarget) -> Result<(), ChannelError> {
        debug!(interaction = %target.interaction_id, "acknowledged");
        Ok(())
    }
}

/// One parsed console line.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    Press(&'a str),
}

pub fn parse_line(line: &str) -> Option<Input<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }
    match line.trim_start().strip_prefix(PRESS_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            Some(Input::Press(rest.trim()))
        }
        _ => Some(Input::Text(line)),
    }
}

/// Read stdin until EOF, routing each line through `router`.
pub async fn repl<R, D>(router: &Router<R, D>, platform: Platform, user: &str) -> anyhow::Result<()>
where
    R: Renderer,
    D: Delivery<Payload = R::Payload>,
{
    let counter = AtomicU64::new(0);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let outcome = match parse_line(&line) {
            None => continue,
            Some(Input::Text(text)) => {
                let n = counter.fetch_add(1, Ordering::Relaxed);
                let inbound = InboundMessage::new(platform, CONSOLE_CHANNEL, user, text)
                    .with_message_id(format!("line-{}", n));
                router.on_message(&inbound).await
            }
            Some(Input::Press(id)) => {
                let n = counter.fetch_add(1, Ordering::Relaxed);
                let target = InteractionTarget {
                    channel_id: CONSOLE_CHANNEL.to_string(),
                    message_id: "last".to_string(),
                    interaction_id: format!("press-{}", n),
                };
                let press = InboundInteraction::new(platform, target, user, id);
                router.on_interaction(&press).await
            }
        };

        match outcome {
            Ok(outcome) => debug!(?outcome, "line handled"),
            Err(e) => warn!(error = %e, "delivery failed"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_lines_are_recognized() {
        assert_eq!(parse_line("!press 12"), Some(Input::Press("12")));
        assert_eq!(parse_line("  !press   7  "), Some(Input::Press("7")));
        assert_eq!(parse_line("!pressing"), Some(Input::Text("!pressing")));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \r\n"), None);
    }

    #[test]
    fn text_is_passed_through() {
        assert_eq!(parse_line("/greet bob\r"), Some(Input::Text("/greet bob")));
    }

    #[tokio::test]
    async fn console_delivery_accepts_any_serializable_payload() {
        let delivery: ConsoleDelivery<Vec<u32>> = ConsoleDelivery::new();
        assert!(delivery.create_message("c", None, &vec![1, 2]).await.is_ok());
        assert!(delivery.acknowledge(&InteractionTarget::default()).await.is_ok());
    }

    #[tokio::test]
    async fn edits_before_any_message_are_not_found() {
        let delivery: ConsoleDelivery<String> = ConsoleDelivery::new();
        let target = InteractionTarget {
            message_id: "last".into(),
            ..InteractionTarget::default()
        };
        let err = delivery.edit_message(&target, &"x".to_string()).await.unwrap_err();
        assert!(matches!(err, ChannelError::NotFound(ref id) if id == "last"));
        assert!(delivery.delete_message(&target).await.is_err());

        delivery
            .create_message("c", Some("line-0"), &"hi".to_string())
            .await
            .unwrap();
        assert!(delivery.edit_message(&target, &"x".to_string()).await.is_ok());
        assert!(delivery.delete_message(&target).await.is_ok());
    }
}
