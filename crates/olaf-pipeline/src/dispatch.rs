//! Per-message action dispatcher.
//!
//! One inbound message runs through exactly one pass: idempotency claim →
//! content check → rule parse → (at most one) fallback classification →
//! persistence → reply. Every path ends in a single terminal
//! [`DispatchOutcome`]; a terminal state produces at most one persisted
//! record and at most one outbound reply, and a persisted record always
//! has a reply.
//!
//! The two parse paths meet in the [`ParseOutcome`] tagged union so reply
//! composition and persistence are written once and every variant is
//! exhaustively handled.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use olaf_core::{
    defaults, rules, ClassifierBackend, ClassifyError, FoodItemRepository, InboundMessage,
    InboundMessageRepository, Intent, MessageContent, NewFoodItem, OutboundMessenger, ParseResult,
    ParseSource, Reply, Result, UserRepository,
};

/// Escalation policy: when is the fast path confident enough to write
/// without asking the fallback classifier.
///
/// The threshold is heuristic, not a contract — it is injected here so
/// deployments can tune it without touching call sites.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    pub confidence_threshold: f32,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::CONFIDENCE_THRESHOLD,
        }
    }
}

impl DispatchPolicy {
    /// True when a rule-parse result can be persisted directly.
    pub fn accepts(&self, parse: &ParseResult) -> bool {
        parse.intent == Intent::Add
            && parse.confidence >= self.confidence_threshold
            && parse.has_required_add_slots()
    }
}

/// Which path produced the final understanding of a message.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// The rule parser was confident; no external call was made.
    Rules(ParseResult),
    /// The fallback classifier answered (possibly with unknown intent).
    Fallback(ParseResult),
    /// The fallback classifier was needed but could not answer.
    Unavailable,
}

/// Terminal state of one message's dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Message id was already claimed; nothing was done.
    Duplicate,
    /// Content type this core does not handle (audio, media).
    Unsupported,
    /// Text content was empty.
    Unparseable,
    /// Inventory question acknowledged (listing is handled elsewhere).
    QueryRequested,
    /// Record persisted off the rule parser.
    RecordedViaRules { item_id: i64 },
    /// Record persisted off the fallback classifier.
    RecordedViaLlm { item_id: i64 },
    /// Neither path understood the message; user was asked for details.
    ClarificationRequested,
    /// The classifier was needed and unavailable; user was asked to retry.
    ProcessingFailed,
}

impl DispatchOutcome {
    /// Stable name for structured logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Unsupported => "unsupported",
            Self::Unparseable => "unparseable",
            Self::QueryRequested => "query_requested",
            Self::RecordedViaRules { .. } => "recorded_via_rules",
            Self::RecordedViaLlm { .. } => "recorded_via_llm",
            Self::ClarificationRequested => "clarification_requested",
            Self::ProcessingFailed => "processing_failed",
        }
    }
}

/// The dispatcher. Owns no state across messages; collaborators are
/// injected once at startup and shared by every concurrent message.
pub struct Dispatcher {
    messages: Arc<dyn InboundMessageRepository>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn FoodItemRepository>,
    classifier: Option<Arc<dyn ClassifierBackend>>,
    messenger: Arc<dyn OutboundMessenger>,
    policy: DispatchPolicy,
}

impl Dispatcher {
    pub fn new(
        messages: Arc<dyn InboundMessageRepository>,
        users: Arc<dyn UserRepository>,
        items: Arc<dyn FoodItemRepository>,
        classifier: Option<Arc<dyn ClassifierBackend>>,
        messenger: Arc<dyn OutboundMessenger>,
    ) -> Self {
        Self {
            messages,
            users,
            items,
            classifier,
            messenger,
            policy: DispatchPolicy::default(),
        }
    }

    /// Override the escalation policy.
    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Process one message to its terminal state.
    ///
    /// All classifier-side failures are recovered into replies; only
    /// persistence failures surface as `Err` and are logged by whoever
    /// spawned this unit of work.
    pub async fn handle(&self, msg: &InboundMessage) -> Result<DispatchOutcome> {
        let started = Instant::now();

        // Idempotency gate: the claim is the first side effect, so a
        // redelivered message can never reach persistence or the user.
        if !self.messages.try_claim(&msg.message_id, &msg.sender).await? {
            return self.conclude(msg, started, DispatchOutcome::Duplicate);
        }

        let user_id = self
            .users
            .resolve(&msg.sender, msg.display_name.as_deref())
            .await?;

        let text = match &msg.content {
            MessageContent::Text(text) => text.trim(),
            MessageContent::Audio => {
                self.send(&msg.sender, &Reply::AudioNotSupported).await;
                return self.conclude(msg, started, DispatchOutcome::Unsupported);
            }
            MessageContent::Other(kind) => {
                warn!(
                    subsystem = "pipeline",
                    component = "dispatcher",
                    message_id = %msg.message_id,
                    kind = %kind,
                    "Unhandled content type"
                );
                self.send(&msg.sender, &Reply::NotUnderstood).await;
                return self.conclude(msg, started, DispatchOutcome::Unsupported);
            }
        };

        if text.is_empty() {
            self.send(&msg.sender, &Reply::NotUnderstood).await;
            return self.conclude(msg, started, DispatchOutcome::Unparseable);
        }

        let parsed = rules::parse(text);
        debug!(
            subsystem = "pipeline",
            component = "dispatcher",
            message_id = %msg.message_id,
            intent = %parsed.intent,
            confidence = parsed.confidence,
            "Rule parse complete"
        );

        // Query short-circuits before any escalation consideration.
        if parsed.intent == Intent::Query {
            self.send(&msg.sender, &Reply::QueryPlaceholder).await;
            return self.conclude(msg, started, DispatchOutcome::QueryRequested);
        }

        let outcome = match self.resolve_parse(parsed, text).await {
            ParseOutcome::Rules(parse) => {
                let item_id = self.persist(user_id, msg, &parse).await?;
                self.confirm(&msg.sender, &parse).await;
                DispatchOutcome::RecordedViaRules { item_id }
            }
            ParseOutcome::Fallback(parse)
                if parse.intent == Intent::Add && parse.has_required_add_slots() =>
            {
                let item_id = self.persist(user_id, msg, &parse).await?;
                self.confirm(&msg.sender, &parse).await;
                DispatchOutcome::RecordedViaLlm { item_id }
            }
            ParseOutcome::Fallback(_) => {
                self.send(&msg.sender, &Reply::Clarify).await;
                DispatchOutcome::ClarificationRequested
            }
            ParseOutcome::Unavailable => {
                self.send(&msg.sender, &Reply::ProcessingError).await;
                DispatchOutcome::ProcessingFailed
            }
        };

        self.conclude(msg, started, outcome)
    }

    /// Decide the final understanding: keep the rule parse or escalate.
    ///
    /// Makes at most one classifier call. Classifier failure variants are
    /// logged apart but both collapse into [`ParseOutcome::Unavailable`].
    async fn resolve_parse(&self, parsed: ParseResult, text: &str) -> ParseOutcome {
        if self.policy.accepts(&parsed) {
            return ParseOutcome::Rules(parsed);
        }

        let Some(classifier) = &self.classifier else {
            debug!(
                subsystem = "pipeline",
                component = "dispatcher",
                "No classifier configured; asking for clarification"
            );
            return ParseOutcome::Fallback(ParseResult::unknown(ParseSource::Llm));
        };

        match classifier.classify(text).await {
            Ok(parse) => ParseOutcome::Fallback(parse),
            Err(ClassifyError::Unavailable(error)) => {
                warn!(
                    subsystem = "pipeline",
                    component = "dispatcher",
                    error = %error,
                    "Classifier unavailable"
                );
                ParseOutcome::Unavailable
            }
            Err(ClassifyError::Malformed(error)) => {
                warn!(
                    subsystem = "pipeline",
                    component = "dispatcher",
                    error = %error,
                    "Classifier output malformed"
                );
                ParseOutcome::Unavailable
            }
        }
    }

    async fn persist(&self, user_id: i64, msg: &InboundMessage, parse: &ParseResult) -> Result<i64> {
        let item = NewFoodItem::from_parse(user_id, &msg.message_id, parse);
        self.items.insert(&item).await
    }

    async fn confirm(&self, recipient: &str, parse: &ParseResult) {
        let reply = Reply::Added {
            quantity_text: parse.quantity_text.clone(),
            food_name: parse.food_name.clone().unwrap_or_default(),
            location: parse.location.clone().unwrap_or_default(),
        };
        self.send(recipient, &reply).await;
    }

    /// Deliver a reply. At-least-once: a failed send is logged and never
    /// rolls back what was already persisted.
    async fn send(&self, recipient: &str, reply: &Reply) {
        if let Err(error) = self.messenger.send_text(recipient, &reply.render()).await {
            warn!(
                subsystem = "pipeline",
                component = "dispatcher",
                op = "send_text",
                error = %error,
                "Reply delivery failed"
            );
        }
    }

    fn conclude(
        &self,
        msg: &InboundMessage,
        started: Instant,
        outcome: DispatchOutcome,
    ) -> Result<DispatchOutcome> {
        info!(
            subsystem = "pipeline",
            component = "dispatcher",
            op = "handle",
            message_id = %msg.message_id,
            outcome = outcome.as_str(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Message dispatched"
        );
        Ok(outcome)
    }
}
