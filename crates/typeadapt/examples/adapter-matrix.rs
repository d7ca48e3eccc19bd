//! One `add` procedure per adapter under an `adapters` namespace, called
//! through a projected client over the in-process loopback.
//!
//! Run with:
//!   cargo run --example adapter-matrix --features client,logging

use std::sync::Arc;

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use typeadapt::client::{Client, LocalTransport};
use typeadapt::logging::LogArgs;
use typeadapt::router::{RouterEntry, RpcContext};
use typeadapt::schema::{JsonSchema, JsonSchemaAdapter, JsonSchemaConfig, PassthroughAdapter, SerdeAdapter, SerdeSchema};

#[derive(Parser, Debug)]
#[command(name = "adapter-matrix", about = "Same procedure, several adapters")]
struct Args {
    #[command(flatten)]
    log: LogArgs,
}

#[derive(Debug, Serialize, Deserialize)]
struct AddInput {
    a: f64,
    b: f64,
}

fn add_schema<T>() -> JsonSchema<T> {
    JsonSchema::new(json!({
        "type": "object",
        "required": ["a", "b"],
        "properties": { "a": { "type": "number" }, "b": { "type": "number" } }
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.log.init(module_path!());

    let rpc = RpcContext::new(PassthroughAdapter);
    let strict = JsonSchemaAdapter::with_config(JsonSchemaConfig {
        strict_mode: true,
        ..JsonSchemaConfig::default()
    });

    let adapters = rpc.router([
        (
            "json_schema",
            RouterEntry::from(
                rpc.procedure()
                    .adapter(JsonSchemaAdapter::new())
                    .input(add_schema::<AddInput>())
                    .output(JsonSchema::<f64>::new(json!({ "type": "number" })))
                    .query(|input: AddInput| input.a + input.b),
            ),
        ),
        (
            "strict_json_schema",
            RouterEntry::from(
                rpc.procedure()
                    .adapter(strict)
                    .input(add_schema::<AddInput>())
                    .output(JsonSchema::<f64>::new(json!({ "type": "number" })))
                    .query(|input: AddInput| input.a + input.b),
            ),
        ),
        (
            "serde",
            RouterEntry::from(
                rpc.procedure()
                    .adapter(SerdeAdapter)
                    .input(SerdeSchema::<AddInput>::new())
                    .output(SerdeSchema::<f64>::new())
                    .query(|input: AddInput| input.a + input.b),
            ),
        ),
        (
            "passthrough",
            RouterEntry::from(rpc.procedure().input(()).output(()).query(|input| {
                let a = input["a"].as_f64().unwrap_or_default();
                let b = input["b"].as_f64().unwrap_or_default();
                json!(a + b)
            })),
        ),
    ])?;
    let root = rpc.router([("adapters", adapters)])?;

    let shape = root.shape();
    tracing::info!(shape = %serde_json::to_string(&shape)?, "router shape");

    let client = Client::project(&shape, Arc::new(LocalTransport::new(root)));
    let Some(namespace) = client.namespace("adapters") else {
        return Err("adapters namespace missing".into());
    };

    for name in namespace.names() {
        let stub = namespace.stub(name)?;
        for input in [json!({ "a": 1, "b": 2 }), json!({ "a": "x", "b": 2 })] {
            match stub.call(input.clone()).await {
                Ok(output) => tracing::info!(path = stub.path(), %input, %output, "accepted"),
                Err(err) => tracing::info!(path = stub.path(), %input, kind = %err.kind(), "rejected"),
            }
        }
    }

    Ok(())
}
