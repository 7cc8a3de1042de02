use pagetalk_core::{ChatMessage, PageContext, Role};
use serde::Serialize;
use tracing::warn;

/// Output token cap sent with every request.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// One block inside a provider message or the system channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// Roles the provider accepts in its message list. System content travels in
/// the separate `system` channel, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderMessage {
    pub role: ProviderRole,
    pub content: Vec<ContentBlock>,
}

/// The fixed outbound contract of the provider's messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderPayload {
    pub model: String,
    pub system: Vec<ContentBlock>,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Assemble the full provider payload from a (truncated) transcript and the
/// optional page context.
pub fn build_payload(
    model: &str,
    messages: &[ChatMessage],
    context: Option<&PageContext>,
) -> ProviderPayload {
    ProviderPayload {
        model: model.to_string(),
        system: build_system_blocks(context),
        messages: coalesce_messages(messages),
        max_tokens: DEFAULT_MAX_TOKENS,
        temperature: DEFAULT_TEMPERATURE,
    }
}

/// Fold the page context into the provider's system channel.
///
/// The system prompt and the page-content template are independent: either
/// can be present without the other. A missing `page_content` omits the
/// template entirely rather than emitting it with empty fields.
pub fn build_system_blocks(context: Option<&PageContext>) -> Vec<ContentBlock> {
    let Some(ctx) = context else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    if let Some(prompt) = &ctx.system_prompt {
        blocks.push(ContentBlock::text(prompt.clone()));
    }
    if let Some(content) = &ctx.page_content {
        let title = ctx.title.as_deref().unwrap_or("N/A");
        let url = ctx.url.as_deref().unwrap_or("N/A");
        blocks.push(ContentBlock::text(format!(
            "Page Title: {title}\nURL: {url}\n--- Page Content Start ---\n{content}\n--- Page Content End ---"
        )));
    } else {
        warn!("page context provided without page content");
    }
    blocks
}

/// Merge consecutive same-role messages into one provider message with
/// multiple text blocks, so the message list strictly alternates between
/// user and assistant. Order is preserved and nothing is dropped except
/// stray system messages, which do not belong in history.
pub fn coalesce_messages(messages: &[ChatMessage]) -> Vec<ProviderMessage> {
    let mut out: Vec<ProviderMessage> = Vec::new();
    for message in messages {
        let role = match message.role {
            Role::User => ProviderRole::User,
            Role::Assistant => ProviderRole::Assistant,
            Role::System => {
                warn!("skipping unexpected system message in chat history");
                continue;
            }
        };
        let block = ContentBlock::text(message.content.clone());
        match out.last_mut() {
            Some(last) if last.role == role => last.content.push(block),
            _ => out.push(ProviderMessage {
                role,
                content: vec![block],
            }),
        }
    }
    out
}
