use anyhow::Result;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use tracing::{info, warn};

use crate::use_cases::{DrawUseCase, FormatUseCase};

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, serde::Deserialize)]
struct JsonRpcRequest {
    #[serde(default = "default_jsonrpc")]
    #[allow(dead_code)]
    jsonrpc: String,
    method: String,
    params: Option<Value>,
    id: Option<Value>,
}

fn default_jsonrpc() -> String {
    "2.0".to_string()
}

#[derive(Debug, serde::Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id: Some(id.unwrap_or(json!(1))),
        }
    }

    fn failure(id: Option<Value>, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
            id,
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

#[derive(Debug, serde::Serialize)]
struct Tool {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

pub struct MCPHandler {
    draw_use_case: Arc<DrawUseCase>,
    format_use_case: Arc<FormatUseCase>,
}

impl MCPHandler {
    pub fn new(draw_use_case: Arc<DrawUseCase>, format_use_case: Arc<FormatUseCase>) -> Self {
        Self {
            draw_use_case,
            format_use_case,
        }
    }

    pub async fn serve<R, W>(self, reader: R, mut writer: W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(req) => req,
                Err(e) => {
                    warn!("Failed to parse request: {} - Line: {}", e, line);
                    let error_response = JsonRpcResponse::failure(
                        None,
                        PARSE_ERROR,
                        "Parse error".to_string(),
                        Some(json!(e.to_string())),
                    );
                    writeln!(writer, "{}", serde_json::to_string(&error_response)?)?;
                    writer.flush()?;
                    continue;
                }
            };

            // Notifications never get a response.
            if request.id.is_none() || request.method.starts_with("notifications/") {
                if request.method == "notifications/initialized" {
                    info!("🍀 Client initialized");
                }
                continue;
            }

            let response = self.handle_request(request).await;
            writeln!(writer, "{}", serde_json::to_string(&response)?)?;
            writer.flush()?;
        }

        Ok(())
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_list_tools(request.id),
            "tools/call" => self.handle_call_tool(request.params, request.id).await,
            _ => JsonRpcResponse::failure(
                Some(request.id.unwrap_or(json!(1))),
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
                None,
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("🍀 Initializing Mega-Sena MCP server");
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mega-sena-mcp-server",
                    "version": "0.1.0"
                }
            }),
        )
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.get_tools() }))
    }

    async fn handle_call_tool(&self, params: Option<Value>, id: Option<Value>) -> JsonRpcResponse {
        let id = Some(id.unwrap_or(json!(1)));

        let Some(params) = params else {
            return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing params".to_string(), None);
        };

        let Some(tool_name) = params.get("name").and_then(|n| n.as_str()) else {
            return JsonRpcResponse::failure(
                id,
                INVALID_PARAMS,
                "Missing tool name".to_string(),
                None,
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
        let arguments_map: HashMap<String, Value> =
            serde_json::from_value(arguments).unwrap_or_default();

        match self.execute_tool(tool_name, &arguments_map).await {
            Ok(content) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": content
                        }
                    ]
                }),
            ),
            Err(e) => JsonRpcResponse::failure(
                id,
                INTERNAL_ERROR,
                format!("Tool execution error: {}", e),
                None,
            ),
        }
    }

    async fn execute_tool(
        &self,
        tool_name: &str,
        arguments: &HashMap<String, Value>,
    ) -> Result<String> {
        match tool_name {
            "adapt_draw_result" => self.draw_use_case.adapt_draw_result(arguments).await,
            "resolve_prize_tier" => self.draw_use_case.resolve_prize_tier(arguments).await,
            "summarize_draw_result" => self.draw_use_case.summarize_draw_result(arguments).await,
            "format_currency" => self.format_use_case.format_currency(arguments).await,
            "format_date" => self.format_use_case.format_date(arguments).await,
            _ => Err(anyhow::anyhow!("Unknown tool: {}", tool_name)),
        }
    }

    fn get_tools(&self) -> Vec<Tool> {
        let payload_properties = json!({
            "raw_json": {
                "type": "string",
                "description": "Raw JSON draw payload (object or array whose first element is the draw)"
            },
            "payload": {
                "description": "Draw payload as an inline JSON value, used when raw_json is absent"
            }
        });

        let mut resolve_properties = payload_properties.clone();
        resolve_properties["hit_count"] = json!({
            "type": "integer",
            "enum": [4, 5, 6],
            "description": "Number of matched numbers"
        });

        vec![
            Tool {
                name: "adapt_draw_result".to_string(),
                description: "Normalize a raw Mega-Sena result payload into the canonical draw record"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": payload_properties.clone()
                }),
            },
            Tool {
                name: "resolve_prize_tier".to_string(),
                description: "Find the prize tier for 4, 5 or 6 hits in a raw result payload"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": resolve_properties,
                    "required": ["hit_count"]
                }),
            },
            Tool {
                name: "summarize_draw_result".to_string(),
                description: "Build the formatted, display-ready summary of a raw result payload"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": payload_properties
                }),
            },
            Tool {
                name: "format_currency".to_string(),
                description: "Format an amount as Brazilian Real currency text".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "number",
                            "description": "Amount to format; omitted yields an empty string"
                        }
                    }
                }),
            },
            Tool {
                name: "format_date".to_string(),
                description: "Format a date as dd/mm/yyyy; already formatted text is returned as is"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": "string",
                            "description": "Date such as 2024-06-10 or 10/06/2024"
                        }
                    }
                }),
            },
        ]
    }
}

pub fn stdio() -> (BufReader<io::Stdin>, io::Stdout) {
    (BufReader::new(io::stdin()), io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use megasena::LocaleFormatter;
    use std::io::Cursor;

    fn handler() -> MCPHandler {
        let formatter = Arc::new(LocaleFormatter::default());
        MCPHandler::new(
            Arc::new(DrawUseCase::new(Arc::clone(&formatter))),
            Arc::new(FormatUseCase::new(formatter)),
        )
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        handler()
            .serve(Cursor::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_initialize_and_list_tools() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let responses = exchange(input).await;

        assert_eq!(responses.len(), 2);
        assert_eq!(
            responses[0]["result"]["serverInfo"]["name"],
            "mega-sena-mcp-server"
        );
        let names: Vec<&str> = responses[1]["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "adapt_draw_result",
                "resolve_prize_tier",
                "summarize_draw_result",
                "format_currency",
                "format_date"
            ]
        );
    }

    #[tokio::test]
    async fn test_call_adapt_tool() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {
                "name": "adapt_draw_result",
                "arguments": {"payload": {"numero": 2700, "dezenas": [4, 13, 22, 35, 41, 60]}}
            }
        });
        let responses = exchange(&format!("{}\n", request)).await;

        assert_eq!(responses[0]["id"], 7);
        let text = responses[0]["result"]["content"][0]["text"].as_str().unwrap();
        let content: Value = serde_json::from_str(text).unwrap();
        assert_eq!(content["result"]["contestNumber"], 2700);
        assert_eq!(content["result"]["winningNumbers"][5], 60);
    }

    #[tokio::test]
    async fn test_errors() {
        let input = concat!(
            "{broken\n",
            r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope"}}"#,
            "\n"
        );
        let responses = exchange(input).await;

        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(responses[2]["error"]["code"], INVALID_PARAMS);
        assert_eq!(responses[3]["error"]["code"], INTERNAL_ERROR);
        assert!(
            responses[3]["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Unknown tool: nope")
        );
    }
}
