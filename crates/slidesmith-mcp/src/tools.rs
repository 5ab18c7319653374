use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::macros::{mcp_tool, JsonSchema};
use rust_mcp_sdk::schema::{
    schema_utils::CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
    PaginatedRequestParams, RpcError, TextContent,
};
use rust_mcp_sdk::tool_box;
use rust_mcp_sdk::{mcp_server::ServerHandler, McpServer};
use serde::{Deserialize, Serialize};

use slidesmith_core::chart::{self, RenderOptions};
use slidesmith_core::sample::{self, SampleKind, SampleSeries};
use slidesmith_google::DeckService;

#[derive(Clone)]
pub struct McpContext {
    pub service: Arc<DeckService>,
}

/// Table cells arrive as whatever JSON type the caller sent; everything
/// is rendered to text before it reaches the Slides API.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum CellValue {
    Number(serde_json::Number),
    Bool(bool),
    Text(String),
}

impl CellValue {
    fn render(&self) -> String {
        match self {
            CellValue::Number(number) => number.to_string(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct TableData {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

fn ok_text(content: String) -> Result<CallToolResult, CallToolError> {
    Ok(CallToolResult::text_content(vec![TextContent::from(
        content,
    )]))
}

fn ok_json(value: serde_json::Value) -> Result<CallToolResult, CallToolError> {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    ok_text(text)
}

fn fail(prefix: &str, err: impl Display) -> CallToolError {
    CallToolError::from_message(format!("{prefix}: {err}"))
}

fn opt(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Uppercase the first letter of every alphabetic run, matching the
/// titles `create_chart_from_sample_data` embeds in chart captions.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[mcp_tool(
    name = "create_presentation",
    description = "Create a new Google Slides presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreatePresentationTool {
    /// Name of the presentation.
    pub name: String,
}

#[mcp_tool(
    name = "add_title_slide",
    description = "Add a title slide to an existing presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddTitleSlideTool {
    pub presentation_name: String,
    pub title: String,
    /// Optional subtitle text for the slide.
    #[serde(default)]
    pub subtitle: String,
}

#[mcp_tool(
    name = "add_section_header",
    description = "Add a section header slide to an existing presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddSectionHeaderTool {
    pub presentation_name: String,
    pub header: String,
    #[serde(default)]
    pub subtitle: String,
}

#[mcp_tool(
    name = "add_content_slide",
    description = "Add a content slide with bullet points. Use tab indentation in the content for nested bullets."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddContentSlideTool {
    pub presentation_name: String,
    pub title: String,
    pub content: String,
}

#[mcp_tool(
    name = "add_two_column_slide",
    description = "Add a two-column comparison slide to an existing presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddTwoColumnSlideTool {
    pub presentation_name: String,
    pub title: String,
    pub left_title: String,
    pub left_content: String,
    pub right_title: String,
    pub right_content: String,
}

#[mcp_tool(
    name = "add_table_slide",
    description = "Add a slide with a table. Data carries 'headers' (list of strings) and 'rows' (list of lists)."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddTableSlideTool {
    pub presentation_name: String,
    pub title: String,
    pub data: TableData,
}

#[mcp_tool(
    name = "get_presentation_url",
    description = "Get the URL of an existing presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetPresentationUrlTool {
    pub presentation_name: String,
}

#[mcp_tool(
    name = "create_bar_chart",
    description = "Create a bar chart and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateBarChartTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default = "default_bar_title")]
    pub chart_title: String,
    #[serde(default = "default_categories_label")]
    pub x_label: String,
    #[serde(default = "default_values_label")]
    pub y_label: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_line_plot",
    description = "Create a line plot and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateLinePlotTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    #[serde(default = "default_line_title")]
    pub chart_title: String,
    #[serde(default = "default_x_axis")]
    pub x_label: String,
    #[serde(default = "default_y_axis")]
    pub y_label: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_pie_chart",
    description = "Create a pie chart and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreatePieChartTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default = "default_pie_title")]
    pub chart_title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_scatter_plot",
    description = "Create a scatter plot and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateScatterPlotTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    #[serde(default = "default_scatter_title")]
    pub chart_title: String,
    #[serde(default = "default_x_axis")]
    pub x_label: String,
    #[serde(default = "default_y_axis")]
    pub y_label: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_heatmap",
    description = "Create a heatmap from a 2D matrix and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateHeatmapTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub matrix: Vec<Vec<f64>>,
    pub x_labels: Option<Vec<String>>,
    pub y_labels: Option<Vec<String>>,
    #[serde(default = "default_heatmap_title")]
    pub chart_title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_histogram",
    description = "Create a histogram and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateHistogramTool {
    pub presentation_name: String,
    pub slide_title: String,
    pub values: Vec<f64>,
    #[serde(default = "default_histogram_title")]
    pub chart_title: String,
    #[serde(default = "default_values_label")]
    pub x_label: String,
    #[serde(default = "default_count_label")]
    pub y_label: String,
    /// Number of bins; defaults to the square root of the value count.
    pub bins: Option<u64>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "create_scatter_matrix",
    description = "Create a scatter matrix (pairs plot) and add it as a slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateScatterMatrixTool {
    pub presentation_name: String,
    pub slide_title: String,
    /// Column name to list of values; all lists must have equal length.
    pub data: BTreeMap<String, Vec<f64>>,
    #[serde(default = "default_scatter_matrix_title")]
    pub chart_title: String,
    #[serde(default = "default_matrix_size")]
    pub width: u32,
    #[serde(default = "default_matrix_size")]
    pub height: u32,
}

#[mcp_tool(
    name = "generate_sample_data",
    description = "Generate sample data for plotting (sine_wave, categories, linear, normal)."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GenerateSampleDataTool {
    #[serde(default = "default_data_type")]
    pub data_type: String,
    #[serde(default = "default_n_points")]
    pub n_points: u64,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

#[mcp_tool(
    name = "create_chart_from_sample_data",
    description = "Generate sample data and create a matching chart slide in the presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateChartFromSampleDataTool {
    pub presentation_name: String,
    pub slide_title: String,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    #[serde(default = "default_chart_type")]
    pub chart_type: String,
    #[serde(default = "default_n_points")]
    pub n_points: u64,
    pub seed: Option<u64>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[mcp_tool(
    name = "apply_theme_from_presentation",
    description = "Apply theme from another Google Slides presentation."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ApplyThemeFromPresentationTool {
    pub presentation_name: String,
    pub source_presentation_id: String,
}

#[mcp_tool(
    name = "apply_beautiful_styling",
    description = "Apply beautiful styling and colors to make the presentation look professional."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ApplyBeautifulStylingTool {
    pub presentation_name: String,
}

#[mcp_tool(
    name = "apply_theme_by_name",
    description = "Search for and apply a theme template from Google Drive by name."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ApplyThemeByNameTool {
    pub presentation_name: String,
    pub theme_name: String,
}

#[mcp_tool(
    name = "list_available_themes",
    description = "List available theme templates in Google Drive."
)]
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ListAvailableThemesTool {}

fn default_data_type() -> String {
    "sine_wave".to_string()
}

fn default_chart_type() -> String {
    "line".to_string()
}

fn default_n_points() -> u64 {
    100
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_matrix_size() -> u32 {
    1000
}

fn default_bar_title() -> String {
    "Bar Chart".to_string()
}

fn default_line_title() -> String {
    "Line Plot".to_string()
}

fn default_pie_title() -> String {
    "Pie Chart".to_string()
}

fn default_scatter_title() -> String {
    "Scatter Plot".to_string()
}

fn default_heatmap_title() -> String {
    "Heatmap".to_string()
}

fn default_histogram_title() -> String {
    "Histogram".to_string()
}

fn default_scatter_matrix_title() -> String {
    "Scatter Matrix".to_string()
}

fn default_categories_label() -> String {
    "Categories".to_string()
}

fn default_values_label() -> String {
    "Values".to_string()
}

fn default_count_label() -> String {
    "Count".to_string()
}

fn default_x_axis() -> String {
    "X Axis".to_string()
}

fn default_y_axis() -> String {
    "Y Axis".to_string()
}

// Generates enum SlidesmithTools with variants for each tool
tool_box!(
    SlidesmithTools,
    [
        CreatePresentationTool,
        AddTitleSlideTool,
        AddSectionHeaderTool,
        AddContentSlideTool,
        AddTwoColumnSlideTool,
        AddTableSlideTool,
        GetPresentationUrlTool,
        CreateBarChartTool,
        CreateLinePlotTool,
        CreatePieChartTool,
        CreateScatterPlotTool,
        CreateHeatmapTool,
        CreateHistogramTool,
        CreateScatterMatrixTool,
        GenerateSampleDataTool,
        CreateChartFromSampleDataTool,
        ApplyThemeFromPresentationTool,
        ApplyBeautifulStylingTool,
        ApplyThemeByNameTool,
        ListAvailableThemesTool
    ]
);

pub struct SlidesmithServerHandler {
    pub context: McpContext,
}

#[async_trait]
impl ServerHandler for SlidesmithServerHandler {
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            meta: None,
            next_cursor: None,
            tools: SlidesmithTools::tools(),
        })
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: std::sync::Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        let tool = SlidesmithTools::try_from(params).map_err(CallToolError::new)?;
        match tool {
            SlidesmithTools::CreatePresentationTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::AddTitleSlideTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::AddSectionHeaderTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::AddContentSlideTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::AddTwoColumnSlideTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::AddTableSlideTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::GetPresentationUrlTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateBarChartTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateLinePlotTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreatePieChartTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateScatterPlotTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateHeatmapTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateHistogramTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateScatterMatrixTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::GenerateSampleDataTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::CreateChartFromSampleDataTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::ApplyThemeFromPresentationTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::ApplyBeautifulStylingTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::ApplyThemeByNameTool(tool) => tool.call(&self.context).await,
            SlidesmithTools::ListAvailableThemesTool(tool) => tool.call(&self.context).await,
        }
    }
}

impl CreatePresentationTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context.service.create_deck(&self.name).await {
            Ok(presentation_id) => ok_text(format!(
                "Created new presentation: {} (ID: {presentation_id})",
                self.name
            )),
            Err(err) => Err(fail("Failed to create presentation", err)),
        }
    }
}

impl AddTitleSlideTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .add_title_slide(&self.presentation_name, &self.title, opt(&self.subtitle))
            .await
        {
            Ok(()) => ok_text(format!(
                "Added title slide '{}' to presentation: {}",
                self.title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add title slide", err)),
        }
    }
}

impl AddSectionHeaderTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .add_section_slide(&self.presentation_name, &self.header, opt(&self.subtitle))
            .await
        {
            Ok(()) => ok_text(format!(
                "Added section header slide '{}' to presentation: {}",
                self.header, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add section header slide", err)),
        }
    }
}

impl AddContentSlideTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .add_content_slide(&self.presentation_name, &self.title, &self.content)
            .await
        {
            Ok(()) => ok_text(format!(
                "Added content slide '{}' to presentation: {}",
                self.title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add content slide", err)),
        }
    }
}

impl AddTwoColumnSlideTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .add_two_column_slide(
                &self.presentation_name,
                &self.title,
                &self.left_title,
                &self.left_content,
                &self.right_title,
                &self.right_content,
            )
            .await
        {
            Ok(()) => ok_text(format!(
                "Added two-column slide '{}' to presentation: {}",
                self.title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add two-column slide", err)),
        }
    }
}

impl AddTableSlideTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let rows: Vec<Vec<String>> = self
            .data
            .rows
            .iter()
            .map(|row| row.iter().map(CellValue::render).collect())
            .collect();
        match context
            .service
            .add_table_slide(&self.presentation_name, &self.title, &self.data.headers, &rows)
            .await
        {
            Ok(()) => ok_text(format!(
                "Added table slide '{}' to presentation: {}",
                self.title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add table slide", err)),
        }
    }
}

impl GetPresentationUrlTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context.service.presentation_url(&self.presentation_name).await {
            Ok(url) => ok_text(format!("Presentation URL: {url}")),
            Err(err) => Err(fail("Failed to get presentation URL", err)),
        }
    }
}

impl CreateBarChartTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
        };
        let result = async {
            let png = chart::render_bar(&self.categories, &self.values, &opts)?;
            let caption = format!("Chart showing {} by {}", self.y_label, self.x_label);
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added bar chart slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add bar chart slide", err)),
        }
    }
}

impl CreateLinePlotTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
        };
        let result = async {
            let png = chart::render_line(&self.x_values, &self.y_values, &opts)?;
            let caption = format!("Chart showing {} vs {}", self.y_label, self.x_label);
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added line plot slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add line plot slide", err)),
        }
    }
}

impl CreatePieChartTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            width: self.width,
            height: self.height,
            ..RenderOptions::default()
        };
        let result = async {
            let png = chart::render_pie(&self.labels, &self.values, &opts)?;
            let caption = format!("Pie chart showing distribution of {}", self.chart_title);
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added pie chart slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add pie chart slide", err)),
        }
    }
}

impl CreateScatterPlotTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
        };
        let result = async {
            let png = chart::render_scatter(&self.x_values, &self.y_values, &opts)?;
            let caption = format!(
                "Scatter plot showing relationship between {} and {}",
                self.x_label, self.y_label
            );
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added scatter plot slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add scatter plot slide", err)),
        }
    }
}

impl CreateHeatmapTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            width: self.width,
            height: self.height,
            ..RenderOptions::default()
        };
        let result = async {
            let png = chart::render_heatmap(
                &self.matrix,
                self.x_labels.as_deref(),
                self.y_labels.as_deref(),
                &opts,
            )?;
            let caption = format!("Heatmap visualization of {}", self.chart_title);
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added heatmap slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add heatmap slide", err)),
        }
    }
}

impl CreateHistogramTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            width: self.width,
            height: self.height,
        };
        let result = async {
            let png = chart::render_histogram(&self.values, self.bins.map(|b| b as usize), &opts)?;
            let caption = format!("Histogram showing distribution of {}", self.x_label);
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(&caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added histogram slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add histogram slide", err)),
        }
    }
}

impl CreateScatterMatrixTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let opts = RenderOptions {
            title: self.chart_title.clone(),
            width: self.width,
            height: self.height,
            ..RenderOptions::default()
        };
        let columns: Vec<(String, Vec<f64>)> = self
            .data
            .iter()
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect();
        let result = async {
            let png = chart::render_scatter_matrix(&columns, &opts)?;
            let caption = "Scatter matrix showing relationships between variables";
            context
                .service
                .add_image_slide(&self.presentation_name, &self.slide_title, png, Some(caption))
                .await
        }
        .await;
        match result {
            Ok(()) => ok_text(format!(
                "Added scatter matrix slide '{}' to presentation: {}",
                self.slide_title, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to add scatter matrix slide", err)),
        }
    }
}

impl GenerateSampleDataTool {
    async fn call(&self, _context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let kind: SampleKind = self
            .data_type
            .parse()
            .map_err(|err| CallToolError::from_message(format!("{err}")))?;
        let series = sample::generate(kind, self.n_points as usize, self.seed);
        let value = serde_json::to_value(&series)
            .map_err(|err| CallToolError::from_message(err.to_string()))?;
        ok_json(value)
    }
}

impl CreateChartFromSampleDataTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        let kind: SampleKind = self
            .data_type
            .parse()
            .map_err(|err| fail("Failed to create chart from sample data", err))?;
        let series = sample::generate(kind, self.n_points as usize, self.seed);
        let data_title = title_case(&self.data_type);

        let delegated = match (self.chart_type.as_str(), series) {
            ("line", SampleSeries::Xy { x, y }) => {
                CreateLinePlotTool {
                    presentation_name: self.presentation_name.clone(),
                    slide_title: self.slide_title.clone(),
                    x_values: x,
                    y_values: y,
                    chart_title: format!("Line Plot of {data_title} Data"),
                    x_label: default_x_axis(),
                    y_label: default_y_axis(),
                    width: self.width,
                    height: self.height,
                }
                .call(context)
                .await
            }
            ("scatter", SampleSeries::Xy { x, y }) => {
                CreateScatterPlotTool {
                    presentation_name: self.presentation_name.clone(),
                    slide_title: self.slide_title.clone(),
                    x_values: x,
                    y_values: y,
                    chart_title: format!("Scatter Plot of {data_title} Data"),
                    x_label: default_x_axis(),
                    y_label: default_y_axis(),
                    width: self.width,
                    height: self.height,
                }
                .call(context)
                .await
            }
            ("bar", SampleSeries::Categorical { categories, values }) => {
                CreateBarChartTool {
                    presentation_name: self.presentation_name.clone(),
                    slide_title: self.slide_title.clone(),
                    categories,
                    values,
                    chart_title: format!("Bar Chart of {data_title} Data"),
                    x_label: default_categories_label(),
                    y_label: default_values_label(),
                    width: self.width,
                    height: self.height,
                }
                .call(context)
                .await
            }
            ("pie", SampleSeries::Categorical { categories, values }) => {
                CreatePieChartTool {
                    presentation_name: self.presentation_name.clone(),
                    slide_title: self.slide_title.clone(),
                    labels: categories,
                    values,
                    chart_title: format!("Pie Chart of {data_title} Data"),
                    width: self.width,
                    height: self.height,
                }
                .call(context)
                .await
            }
            ("histogram", SampleSeries::Values { values }) => {
                CreateHistogramTool {
                    presentation_name: self.presentation_name.clone(),
                    slide_title: self.slide_title.clone(),
                    values,
                    chart_title: format!("Histogram of {data_title} Data"),
                    x_label: default_values_label(),
                    y_label: default_count_label(),
                    bins: None,
                    width: self.width,
                    height: self.height,
                }
                .call(context)
                .await
            }
            _ => {
                return Err(CallToolError::from_message(format!(
                    "Incompatible data type ({}) and chart type ({}).",
                    self.data_type, self.chart_type
                )))
            }
        };

        delegated.map_err(|err| fail("Failed to create chart from sample data", err))
    }
}

impl ApplyThemeFromPresentationTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .apply_theme_from(&self.presentation_name, &self.source_presentation_id)
            .await
        {
            Ok(()) => ok_text(format!(
                "Applied theme from {} to {}",
                self.source_presentation_id, self.presentation_name
            )),
            Err(err) => Err(fail("Failed to apply theme", err)),
        }
    }
}

impl ApplyBeautifulStylingTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context.service.apply_styling(&self.presentation_name).await {
            Ok(_) => ok_text(format!(
                "Applied beautiful styling to {}",
                self.presentation_name
            )),
            Err(err) => Err(fail("Failed to apply styling", err)),
        }
    }
}

impl ApplyThemeByNameTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context
            .service
            .apply_theme_by_name(&self.presentation_name, &self.theme_name)
            .await
        {
            Ok(theme_file_name) => ok_text(format!(
                "Applied theme '{theme_file_name}' to {}",
                self.presentation_name
            )),
            Err(err) => Err(fail("Failed to apply theme by name", err)),
        }
    }
}

impl ListAvailableThemesTool {
    async fn call(&self, context: &McpContext) -> Result<CallToolResult, CallToolError> {
        match context.service.list_themes().await {
            Ok(themes) => {
                if themes.is_empty() {
                    return ok_text("No theme templates found in Google Drive.".to_string());
                }
                let mut result = String::from("Available themes:\n");
                for theme in themes {
                    let modified = theme.modified.as_deref().unwrap_or("Unknown");
                    result.push_str(&format!(
                        "- {} (ID: {}) - Modified: {modified}\n",
                        theme.name, theme.id
                    ));
                }
                ok_text(result)
            }
            Err(err) => Err(fail("Failed to list themes", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_catalog_is_complete() {
        let names: Vec<String> = SlidesmithTools::tools()
            .into_iter()
            .map(|tool| tool.name)
            .collect();
        for expected in [
            "create_presentation",
            "add_title_slide",
            "add_section_header",
            "add_content_slide",
            "add_two_column_slide",
            "add_table_slide",
            "get_presentation_url",
            "create_bar_chart",
            "create_line_plot",
            "create_pie_chart",
            "create_scatter_plot",
            "create_heatmap",
            "create_histogram",
            "create_scatter_matrix",
            "generate_sample_data",
            "create_chart_from_sample_data",
            "apply_theme_from_presentation",
            "apply_beautiful_styling",
            "apply_theme_by_name",
            "list_available_themes",
        ] {
            assert!(names.iter().any(|name| name == expected), "missing {expected}");
        }
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn title_case_matches_caption_style() {
        assert_eq!(title_case("sine_wave"), "Sine_Wave");
        assert_eq!(title_case("normal"), "Normal");
        assert_eq!(title_case("categories"), "Categories");
    }

    #[test]
    fn cell_values_render_as_text() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"[1, 2.5, true, "text"]"#).expect("parse");
        let rendered: Vec<String> = row.iter().map(CellValue::render).collect();
        assert_eq!(rendered, vec!["1", "2.5", "true", "text"]);
    }

    #[test]
    fn table_data_defaults_to_empty() {
        let data: TableData = serde_json::from_str("{}").expect("parse");
        assert!(data.headers.is_empty());
        assert!(data.rows.is_empty());
    }
}
