//! One-shot client for a running gateway.

use anyhow::{Context, Result, bail};
use console::style;
use serde_json::{Value, json};

/// Post a single user message to `{url}/chat` and print the reply.
pub async fn ask(
    url: &str,
    message: String,
    session_id: Option<String>,
    prompt_type: Option<String>,
    json: bool,
) -> Result<()> {
    let endpoint = format!("{}/chat", url.trim_end_matches('/'));
    let body = request_body(message, session_id, prompt_type);

    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    let payload: Value = response
        .json()
        .await
        .context("gateway returned a non-JSON body")?;

    if !status.is_success() {
        let detail = payload["detail"].as_str().unwrap_or("unknown error");
        bail!("gateway returned {status}: {detail}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Assistant:").cyan().bold(),
        payload["response"].as_str().unwrap_or_default()
    );
    println!();
    println!(
        "  {}",
        style(format!(
            "session {}",
            payload["session_id"].as_str().unwrap_or_default()
        ))
        .dim()
    );
    Ok(())
}

fn request_body(message: String, session_id: Option<String>, prompt_type: Option<String>) -> Value {
    let mut body = json!({
        "messages": [{ "role": "user", "content": message }],
    });
    if let Some(id) = session_id {
        body["session_id"] = Value::String(id);
    }
    if let Some(pt) = prompt_type {
        body["prompt_type"] = Value::String(pt);
    }
    body
}
