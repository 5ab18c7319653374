use rust_mcp_sdk::schema::{
    CallToolRequestParams, ClientCapabilities, Implementation, InitializeRequestParams,
    LATEST_PROTOCOL_VERSION,
};
use rust_mcp_sdk::{
    mcp_client::{client_runtime, ClientHandler, McpClientOptions},
    McpClient, StdioTransport, ToMcpClientHandler, TransportOptions,
};

use async_trait::async_trait;

struct NoopClientHandler;

#[async_trait]
impl ClientHandler for NoopClientHandler {}

fn client_details() -> InitializeRequestParams {
    InitializeRequestParams {
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "slidesmith-mcp-test".into(),
            version: "0.1.0".into(),
            title: Some("Slidesmith MCP Test".into()),
            description: Some("Integration test client".into()),
            icons: vec![],
            website_url: None,
        },
        protocol_version: LATEST_PROTOCOL_VERSION.into(),
        meta: None,
    }
}

macro_rules! start_client {
    () => {{
        let server_bin = env!("CARGO_BIN_EXE_slidesmith-mcp");
        let transport = StdioTransport::create_with_server_launch(
            server_bin,
            vec![],
            None,
            TransportOptions::default(),
        )
        .expect("transport");

        let client = client_runtime::create_client(McpClientOptions {
            client_details: client_details(),
            transport,
            handler: NoopClientHandler.to_mcp_client_handler(),
            task_store: None,
            server_task_store: None,
        });

        client.clone().start().await.expect("start client");
        client
    }};
}

#[tokio::test]
async fn mcp_generates_sample_data() {
    let client = start_client!();

    let sine = client
        .request_tool_call(CallToolRequestParams {
            name: "generate_sample_data".to_string(),
            arguments: Some(
                serde_json::json!({"data_type": "sine_wave", "n_points": 8, "seed": 42})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            meta: None,
            task: None,
        })
        .await
        .expect("generate_sample_data");
    let sine_text = sine
        .content
        .first()
        .unwrap()
        .as_text_content()
        .unwrap()
        .text
        .clone();
    let parsed: serde_json::Value = serde_json::from_str(&sine_text).expect("json");
    assert_eq!(parsed["x"].as_array().unwrap().len(), 8);
    assert_eq!(parsed["y"].as_array().unwrap().len(), 8);

    let categories = client
        .request_tool_call(CallToolRequestParams {
            name: "generate_sample_data".to_string(),
            arguments: Some(
                serde_json::json!({"data_type": "categories", "n_points": 3, "seed": 1})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            meta: None,
            task: None,
        })
        .await
        .expect("generate_sample_data categories");
    let categories_text = categories
        .content
        .first()
        .unwrap()
        .as_text_content()
        .unwrap()
        .text
        .clone();
    assert!(categories_text.contains("Category 1"));

    client.shut_down().await.expect("shutdown");
}

#[tokio::test]
async fn mcp_rejects_bad_inputs_without_remote_calls() {
    let client = start_client!();

    // Unknown sample kind fails before anything else runs.
    let unknown = client
        .request_tool_call(CallToolRequestParams {
            name: "generate_sample_data".to_string(),
            arguments: Some(
                serde_json::json!({"data_type": "spiral"})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            meta: None,
            task: None,
        })
        .await;
    match unknown {
        Ok(result) => assert!(result.is_error.unwrap_or(false)),
        Err(_) => {}
    }

    // A deck that was never created resolves to a not-found error, with
    // no token file and no network involved.
    let missing = client
        .request_tool_call(CallToolRequestParams {
            name: "get_presentation_url".to_string(),
            arguments: Some(
                serde_json::json!({"presentation_name": "nope"})
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            meta: None,
            task: None,
        })
        .await;
    match missing {
        Ok(result) => assert!(result.is_error.unwrap_or(false)),
        Err(_) => {}
    }

    // Incompatible pairing is rejected during composition, before any
    // chart is rendered or uploaded.
    let incompatible = client
        .request_tool_call(CallToolRequestParams {
            name: "create_chart_from_sample_data".to_string(),
            arguments: Some(
                serde_json::json!({
                    "presentation_name": "nope",
                    "slide_title": "Mismatch",
                    "data_type": "normal",
                    "chart_type": "bar"
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            meta: None,
            task: None,
        })
        .await;
    match incompatible {
        Ok(result) => assert!(result.is_error.unwrap_or(false)),
        Err(_) => {}
    }

    client.shut_down().await.expect("shutdown");
}
