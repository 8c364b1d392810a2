// ABOUTME: FunctionTool - wraps a typed async function as a Tool. The shape
// ABOUTME: and schema are derived once; each call binds, invokes and encodes.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::{CallContext, IntoToolOutput, Tool};
use crate::bind::Binder;
use crate::error::ToolError;
use crate::schema::Schema;
use crate::shape::{ParameterShape, Shaped};

/// The type-erased call: bound arguments in, result out.
type Handler =
    Arc<dyn Fn(CallContext, Value) -> BoxFuture<'static, Result<Value, ToolError>> + Send + Sync>;

/// A tool backed by a typed function.
///
/// The parameter type `P` supplies both the shape (through [`Shaped`]) and the
/// deserialization of bound arguments (through `serde`); its serde field names
/// must match the wire names its shape declares.
#[derive(Clone)]
pub struct FunctionTool {
    name: String,
    description: String,
    shape: ParameterShape,
    schema: Option<Schema>,
    binder: Binder,
    handler: Handler,
}

impl FunctionTool {
    /// Wrap a function that takes its parameters only.
    pub fn new<P, F, Fut, R>(
        name: impl Into<String>,
        description: impl Into<String>,
        f: F,
    ) -> Self
    where
        P: Shaped + DeserializeOwned + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoToolOutput,
    {
        Self::with_context(name, description, move |_ctx: CallContext, params: P| f(params))
    }

    /// Wrap a function that also receives the caller's [`CallContext`].
    pub fn with_context<P, F, Fut, R>(
        name: impl Into<String>,
        description: impl Into<String>,
        f: F,
    ) -> Self
    where
        P: Shaped + DeserializeOwned + Send + 'static,
        F: Fn(CallContext, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoToolOutput,
    {
        let shape = ParameterShape::of::<P>();
        let schema = Schema::for_shape(&shape);
        let f = Arc::new(f);
        let handler: Handler = Arc::new(move |ctx: CallContext, bound: Value| {
            let f = Arc::clone(&f);
            async move {
                let params: P = serde_json::from_value(bound)?;
                f(ctx, params).await.into_output()
            }
            .boxed()
        });

        Self {
            name: name.into(),
            description: description.into(),
            shape,
            schema: Some(schema),
            binder: Binder::default(),
            handler,
        }
    }

    /// Replace the derived schema. `None` advertises no structured input.
    pub fn with_schema(mut self, schema: Option<Schema>) -> Self {
        self.schema = schema;
        self
    }

    /// Use a differently configured binder.
    pub fn with_binder(mut self, binder: Binder) -> Self {
        self.binder = binder;
        self
    }

    /// The parameter shape derived at construction.
    pub fn shape(&self) -> &ParameterShape {
        &self.shape
    }
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("shape", &self.shape)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    async fn execute(
        &self,
        ctx: CallContext,
        input: Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let bound = self.binder.bind(&self.shape, &input)?;
        debug!(target: "fntool", tool = %self.name, "invoking function");
        (self.handler)(ctx, bound).await
    }
}
