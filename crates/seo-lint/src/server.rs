//! MCP (Model Context Protocol) server implementation.
//!
//! This module exposes the analysis over the MCP protocol, making it
//! available to AI assistants and editors via stdio transport.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use, and each `#[tool]` method delegates to core library
//! functions rather than implementing analysis itself.
//!
//! # Adding Tools
//!
//! 1. Define a parameter struct with `Deserialize` + `JsonSchema`
//! 2. Add a `#[tool(description = "...")]` method to the `#[tool_router]` impl
//! 3. Call core library functions, convert errors to `McpError`
//! 4. Return `CallToolResult::success(vec![Content::text(...)])`

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use seo_lint_core::config::{DensityProfile, Thresholds};
use seo_lint_core::{DEFAULT_MAX_INPUT_BYTES, Document, analyze_document, check_input_size};

use crate::commands::density::DensityReport;
use crate::commands::suggest::SuggestReport;

/// Suggestions returned when the caller gives no `max`.
const DEFAULT_SUGGESTIONS: usize = 5;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_content` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeContentParams {
    /// The HTML content to analyze.
    pub html: String,
    /// Main keyword. May be empty; keyword checks then report a missing keyword.
    #[serde(default)]
    pub main_keyword: String,
    /// Secondary keywords.
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
    /// Density profile: "strict" or "lenient". Defaults to the server's configuration.
    pub profile: Option<String>,
}

/// Parameters for the `suggest_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SuggestKeywordsParams {
    /// The HTML content to mine.
    pub html: String,
    /// Maximum number of suggestions (default 5).
    pub max: Option<usize>,
}

/// Parameters for the `keyword_density` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct KeywordDensityParams {
    /// The HTML content to measure.
    pub html: String,
    /// Keyword to measure.
    pub keyword: String,
    /// Include per-heading details and a body sample.
    #[serde(default)]
    pub details: bool,
}

/// MCP server exposing the content checks to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    thresholds: Thresholds,
    max_input: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(Thresholds::default(), Some(DEFAULT_MAX_INPUT_BYTES))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance.
    pub fn new(thresholds: Thresholds, max_input: Option<usize>) -> Self {
        Self {
            thresholds,
            max_input,
            tool_router: Self::tool_router(),
        }
    }

    fn check_size(&self, html: &str) -> Result<(), McpError> {
        check_input_size(html.len(), self.max_input)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "density_profile": self.thresholds.density_profile.as_str(),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Run the full checklist.
    #[tool(
        description = "Analyze HTML content for SEO: keyword in H1, first paragraph and image alt text, keyword density, secondary keyword coverage, color emphasis, image ratio, keyword links, sentence and paragraph length. Returns a 0-100 score and every check."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_content(
        &self,
        Parameters(params): Parameters<AnalyzeContentParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_content",
            secondary = params.secondary_keywords.len(),
            "executing MCP tool"
        );
        self.check_size(&params.html)?;

        let mut thresholds = self.thresholds.clone();
        if let Some(ref name) = params.profile {
            thresholds.density_profile = name
                .parse::<DensityProfile>()
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            thresholds.max_keyword_density = None;
        }

        let document = Document::parse(&params.html);
        let report = analyze_document(
            &document,
            &params.main_keyword,
            &params.secondary_keywords,
            &thresholds,
        );
        let json = to_json(&report)?;

        tracing::info!(tool = "analyze_content", score = report.score, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Mine keyword suggestions.
    #[tool(
        description = "Suggest main keyword candidates (two- and three-word phrases) mined from HTML content, ranked by quality and frequency."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn suggest_keywords(
        &self,
        Parameters(params): Parameters<SuggestKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "suggest_keywords", max = ?params.max, "executing MCP tool");
        self.check_size(&params.html)?;

        let document = Document::parse(&params.html);
        let report = SuggestReport::new(&document, params.max.unwrap_or(DEFAULT_SUGGESTIONS));
        let json = to_json(&report)?;

        tracing::info!(
            tool = "suggest_keywords",
            suggestions = report.suggestions.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Heading-aware density.
    #[tool(
        description = "Measure keyword density in the body (headings excluded) and inside headings, flagging keyword stuffing in headings."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn keyword_density(
        &self,
        Parameters(params): Parameters<KeywordDensityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "keyword_density", details = params.details, "executing MCP tool");
        self.check_size(&params.html)?;
        if params.keyword.trim().is_empty() {
            return Err(McpError::invalid_params("keyword must not be empty", None));
        }

        let report = DensityReport::measure(
            &params.html,
            &params.keyword,
            &self.thresholds,
            params.details,
        );
        let json = to_json(&report)?;

        tracing::info!(
            tool = "keyword_density",
            stuffing = report.headings.stuffing,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass HTML content and keywords to the tools to get an SEO checklist, keyword suggestions, or heading-aware density.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    const ARTICLE: &str = "<h1>Gardening tips</h1>\
        <p>This article is about gardening tips for small gardens.</p>\
        <p>Gardening tips save time. Good gardening tips need practice.</p>";

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn server_has_tools_capability() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = ProjectServer::default();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = ProjectServer::default();
        let params = Parameters(GetInfoParams {
            format: "text".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");

        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_NAME")));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::default();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let json = extract_json(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["density_profile"], "lenient");
    }

    #[test]
    fn analyze_content_tool_works() {
        let server = ProjectServer::default();
        let params = Parameters(AnalyzeContentParams {
            html: ARTICLE.to_string(),
            main_keyword: "gardening tips".to_string(),
            secondary_keywords: vec!["practice".to_string()],
            profile: Some("strict".to_string()),
        });

        let result = server
            .analyze_content(params)
            .expect("analyze_content should succeed");
        let json = extract_json(&result);
        assert!(json["score"].as_u64().unwrap() <= 100);
        assert_eq!(json["checks"].as_array().unwrap().len(), 10);
        assert_eq!(json["checks"][0]["status"], "success");
        assert_eq!(json["keyword_count"], 4);
    }

    #[test]
    fn analyze_content_rejects_unknown_profile() {
        let server = ProjectServer::default();
        let params = Parameters(AnalyzeContentParams {
            html: ARTICLE.to_string(),
            main_keyword: String::new(),
            secondary_keywords: Vec::new(),
            profile: Some("extreme".to_string()),
        });
        assert!(server.analyze_content(params).is_err());
    }

    #[test]
    fn oversized_input_is_rejected() {
        let server = ProjectServer::new(Thresholds::default(), Some(8));
        let params = Parameters(SuggestKeywordsParams {
            html: ARTICLE.to_string(),
            max: None,
        });
        assert!(server.suggest_keywords(params).is_err());
    }

    #[test]
    fn suggest_keywords_tool_works() {
        let server = ProjectServer::default();
        let params = Parameters(SuggestKeywordsParams {
            html: ARTICLE.to_string(),
            max: Some(2),
        });

        let result = server
            .suggest_keywords(params)
            .expect("suggest_keywords should succeed");
        let json = extract_json(&result);
        let suggestions = json["suggestions"].as_array().unwrap();
        assert!(!suggestions.is_empty() && suggestions.len() <= 2);
        assert_eq!(suggestions[0]["keyword"], "gardening tips");
        assert_eq!(suggestions[0]["type"], "two-word");
    }

    #[test]
    fn keyword_density_tool_works() {
        let server = ProjectServer::default();
        let params = Parameters(KeywordDensityParams {
            html: ARTICLE.to_string(),
            keyword: "gardening".to_string(),
            details: true,
        });

        let result = server
            .keyword_density(params)
            .expect("keyword_density should succeed");
        let json = extract_json(&result);
        assert_eq!(json["body"]["occurrences"], 3);
        assert_eq!(json["headings"]["headings"]["heading_count"], 1);
        assert!(json["headings"]["stuffing"].as_bool().unwrap());
        assert!(json["body"]["sample"].is_string());
    }

    #[test]
    fn keyword_density_requires_keyword() {
        let server = ProjectServer::default();
        let params = Parameters(KeywordDensityParams {
            html: ARTICLE.to_string(),
            keyword: " ".to_string(),
            details: false,
        });
        assert!(server.keyword_density(params).is_err());
    }
}
