//! Method builder demo: `add` over `{a, b}` and an `echo` method, each
//! behind a JSON Schema boundary.
//!
//! Run with:
//!   cargo run --example method-builder --features logging -- --log-level debug

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::json;
use typeadapt::logging::LogArgs;
use typeadapt::method::MethodBuilder;
use typeadapt::schema::{Dialect, JsonSchema, JsonSchemaAdapter, PassthroughAdapter};

#[derive(Parser, Debug)]
#[command(name = "method-builder", about = "Validated method demo")]
struct Args {
    #[command(flatten)]
    log: LogArgs,

    /// JSON Schema dialect for the method schemas.
    #[arg(long, default_value = "draft-7")]
    dialect: Dialect,
}

#[derive(Debug, Serialize, Deserialize)]
struct AddInput {
    a: f64,
    b: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.log.init(module_path!());

    let methods = MethodBuilder::new(JsonSchemaAdapter::with_dialect(args.dialect));
    let add = methods.method(
        JsonSchema::<AddInput>::new(json!({
            "type": "object",
            "required": ["a", "b"],
            "properties": { "a": { "type": "number" }, "b": { "type": "number" } }
        })),
        JsonSchema::<f64>::new(json!({ "type": "number" })),
        |input: AddInput| input.a + input.b,
    );

    let sum = add.call(AddInput { a: 1.0, b: 2.0 })?;
    tracing::info!(sum, "add(1, 2)");

    match add.call_value(json!({ "a": "one", "b": 2 })) {
        Ok(value) => tracing::warn!(%value, "unexpectedly accepted"),
        Err(err) => tracing::info!(kind = %err.kind(), error = %err, "add rejected bad input"),
    }

    let echo = MethodBuilder::new(PassthroughAdapter).method((), (), |value| value);
    let original = json!({ "nested": [1, 2, { "deep": true }] });
    let returned = echo.call(original.clone())?;
    tracing::info!(same = (returned == original), "echo");

    Ok(())
}
