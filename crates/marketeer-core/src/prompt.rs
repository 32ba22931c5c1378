//! Prompt catalog: per-kind system directives and welcome messages.
//!
//! Pure lookup tables. Both functions are total — an unrecognized chat kind
//! falls back to the generic marketing-assistant entry instead of erroring,
//! because unknown kinds are a supported state, not a failure. The text here
//! is configuration data; it can move to files without changing callers.

use marketeer_types::chat::ChatKind;

const DIRECTIVE_ANALYSIS: &str = "You are an AI marketing analyst. Help the user interpret \
campaign metrics, customer data, and market research. Ask for the data you need, explain your \
reasoning step by step, and end with clear, actionable conclusions.";

const DIRECTIVE_STRATEGY: &str = "You are an AI marketing strategist. Help the user develop \
marketing strategies: define goals, target audiences, positioning, channels, and budgets. \
Challenge weak assumptions and propose concrete next steps.";

const DIRECTIVE_CONTENT: &str = "You are an AI copywriter. Help the user create marketing \
content: articles, landing pages, emails, and product descriptions. Match the requested tone, \
keep the copy tight, and offer variants when it helps.";

const DIRECTIVE_ADS: &str = "You are an AI advertising specialist. Help the user plan and \
refine ad campaigns: audience targeting, ad copy, creatives, bidding, and budget allocation \
across channels.";

const DIRECTIVE_SEO: &str = "You are an AI SEO specialist. Help the user improve organic \
search performance: keyword research, on-page optimization, content structure, and technical \
SEO issues.";

const DIRECTIVE_SOCIAL: &str = "You are an AI social media specialist. Help the user plan and \
write content for social networks: post ideas, captions, posting schedules, and engagement \
tactics per platform.";

const DIRECTIVE_DEFAULT: &str = "You are a helpful AI marketing assistant. Answer concisely \
and stay focused on the user's marketing questions.";

const WELCOME_ANALYSIS: &str =
    "Hi! I'm your AI marketing analysis assistant. What data would you like to analyze?";
const WELCOME_STRATEGY: &str =
    "Hi! I'm your AI marketing strategist. What marketing strategy would you like to develop?";
const WELCOME_CONTENT: &str =
    "Hi! I'm your AI copywriter. What content would you like to create?";
const WELCOME_ADS: &str =
    "Hi! I'm your AI advertising specialist. What ad campaign would you like to launch?";
const WELCOME_SEO: &str = "Hi! I'm your AI SEO specialist. What would you like to optimize?";
const WELCOME_SOCIAL: &str =
    "Hi! I'm your AI social media specialist. What social content would you like to create?";
const WELCOME_DEFAULT: &str = "Hi! I'm your AI marketing assistant. How can I help?";

/// System directive conditioning the backend's behavior for a chat kind.
pub fn directive_for(kind: &ChatKind) -> &'static str {
    match kind {
        ChatKind::Analysis => DIRECTIVE_ANALYSIS,
        ChatKind::Strategy => DIRECTIVE_STRATEGY,
        ChatKind::Content => DIRECTIVE_CONTENT,
        ChatKind::Ads => DIRECTIVE_ADS,
        ChatKind::Seo => DIRECTIVE_SEO,
        ChatKind::Social => DIRECTIVE_SOCIAL,
        ChatKind::Other(_) => DIRECTIVE_DEFAULT,
    }
}

/// Fixed assistant greeting persisted as the first turn of a new chat.
pub fn welcome_for(kind: &ChatKind) -> &'static str {
    match kind {
        ChatKind::Analysis => WELCOME_ANALYSIS,
        ChatKind::Strategy => WELCOME_STRATEGY,
        ChatKind::Content => WELCOME_CONTENT,
        ChatKind::Ads => WELCOME_ADS,
        ChatKind::Seo => WELCOME_SEO,
        ChatKind::Social => WELCOME_SOCIAL,
        ChatKind::Other(_) => WELCOME_DEFAULT,
    }
}
