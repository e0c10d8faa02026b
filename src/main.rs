mod args;

use std::collections::HashMap;
use std::io::Read;
use anyhow::{anyhow, Context};
use clap::Parser;
use serde_json::Value;
use mockallan_client::{Body, ClientSettings, ExpectedBody, MockallanClient, RequestOption};
use args::{Args, BodyArgs, Command, EndpointWithBody};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    }
    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let settings = ClientSettings::new(args.base_url).with_timeout_secs(args.timeout);
    let client = MockallanClient::with_settings(settings).context("failed to build mockallan client")?;
    match args.command {
        Command::AssertCalled(endpoint) => {
            client.assert_called(&endpoint.method, &endpoint.path).await?;
        }
        Command::AssertCalledOnce(endpoint) => {
            client.assert_called_once(&endpoint.method, &endpoint.path).await?;
        }
        Command::AssertCalledWith(with_body) => {
            let (method, path, expected) = expected_body(with_body)?;
            client.assert_called_with(&method, &path, expected).await?;
        }
        Command::AssertCalledOnceWith(with_body) => {
            let (method, path, expected) = expected_body(with_body)?;
            client.assert_called_once_with(&method, &path, expected).await?;
        }
        Command::Config { file } => {
            let config: Value = serde_json::from_str(&read_source(&file)?)
                .with_context(|| format!("{} is not a JSON document", file))?;
            client.configure(&config).await?;
        }
        Command::CallArgs => match client.call_args().await? {
            Body::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Body::Text(text) => println!("{}", text),
            Body::Bytes(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
        },
        Command::CallArgsList => {
            let calls = client.call_args_list().await?;
            println!("{}", serde_json::to_string_pretty(&calls)?);
        }
        Command::CallCount => {
            println!("{}", client.call_count().await?);
        }
        Command::Request { method, path, body, headers } => {
            let mut option = request_option(body)?;
            if !headers.is_empty() {
                option.headers = Some(parse_headers(&headers)?);
            }
            let response = client.request(&method, &path, option).await?;
            let status = response.status();
            println!("{}", status);
            println!("{}", response.text().await?);
        }
    }
    Ok(())
}

fn expected_body(with_body: EndpointWithBody) -> anyhow::Result<(String, String, ExpectedBody)> {
    let payload = match (with_body.body.json, with_body.body.data) {
        (Some(json), _) => Body::Json(serde_json::from_str(&json).context("--json is not valid JSON")?),
        (None, Some(data)) => Body::Text(data),
        (None, None) => return Err(anyhow!("an expected body needs --json or --data")),
    };
    let mut expected = ExpectedBody::new(payload);
    expected.content_type = with_body.content_type;
    expected.validator = with_body.validator;
    Ok((with_body.endpoint.method, with_body.endpoint.path, expected))
}

fn request_option(body: BodyArgs) -> anyhow::Result<RequestOption> {
    let mut option = RequestOption::default();
    if let Some(json) = body.json {
        option.json = Some(serde_json::from_str(&json).context("--json is not valid JSON")?);
    }
    if let Some(data) = body.data {
        option.data = Some(data.into_bytes());
    }
    Ok(option)
}

fn parse_headers(headers: &[String]) -> anyhow::Result<HashMap<String, String>> {
    headers
        .iter()
        .map(|header| {
            let parts: Vec<&str> = header.splitn(2, ':').collect();
            if parts.len() != 2 {
                return Err(anyhow!("header '{}' is not `name: value`", header));
            }
            Ok((parts[0].trim().to_string(), parts[1].trim().to_string()))
        })
        .collect()
}

fn read_source(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file))
}
