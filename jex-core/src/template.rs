//! Template engine adapter
//!
//! Wraps a `minijinja` environment configured for command templating: field
//! lookup is strict (a missing field is a render error, not a silent blank)
//! and a `tojson` helper is registered for embedding arbitrary values as
//! JSON fragments. Templates are compiled once at startup and reused for
//! every record.

use crate::error::{JexError, Result};
use minijinja::value::Value as TemplateValue;
use minijinja::{context, Environment, ErrorKind, UndefinedBehavior};
use serde_json::Value;

/// Default map template: the decoded command output under `"out"`, the
/// input record under `"in"`.
pub const DEFAULT_MAP_TEMPLATE: &str =
    r#"{ "out": {{ Out | tojson }}, "in": {{ In | tojson }} }"#;

const MAP_TEMPLATE: &str = "map";

fn arg_template(index: usize) -> String {
    format!("arg{index}")
}

/// Serialize an arbitrary template value to a JSON text fragment.
///
/// Registered as both a filter (`{{ In | tojson }}`) and a callable
/// (`{{ tojson(In) }}`). Serialization failure is a template error and
/// therefore fatal for the record being rendered.
fn tojson(value: TemplateValue) -> std::result::Result<String, minijinja::Error> {
    serde_json::to_string(&value).map_err(|err| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot serialize value to JSON: {err}"),
        )
    })
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_filter("tojson", tojson);
    env.add_function("tojson", tojson);
    env
}

/// Compiled argv and map templates, built once at startup.
#[derive(Debug)]
pub struct TemplateSet {
    env: Environment<'static>,
    argc: usize,
}

impl TemplateSet {
    /// Compile one template per argv position (`arg0`, `arg1`, ...) plus
    /// the `map` template. Any syntax error fails compilation of the whole
    /// set.
    pub fn compile(argv: &[String], map: &str) -> Result<Self> {
        let mut env = environment();
        for (index, source) in argv.iter().enumerate() {
            let name = arg_template(index);
            env.add_template_owned(name.clone(), source.clone())
                .map_err(|source| JexError::TemplateCompile { name, source })?;
        }
        env.add_template_owned(MAP_TEMPLATE, map.to_string())
            .map_err(|source| JexError::TemplateCompile {
                name: MAP_TEMPLATE.to_string(),
                source,
            })?;
        Ok(Self {
            env,
            argc: argv.len(),
        })
    }

    /// Number of argv positions in the set.
    pub fn argc(&self) -> usize {
        self.argc
    }

    /// Render every argv template against `{In: record}`, in position
    /// order. The result has exactly [`TemplateSet::argc`] elements.
    pub fn render_argv(&self, record: &Value) -> Result<Vec<String>> {
        let record = TemplateValue::from_serialize(record);
        (0..self.argc)
            .map(|index| self.render(&arg_template(index), context! { In => record.clone() }))
            .collect()
    }

    /// Render the map template against `{In: record, Out: output}`.
    pub fn render_map(&self, record: &Value, output: &Value) -> Result<String> {
        self.render(
            MAP_TEMPLATE,
            context! {
                In => TemplateValue::from_serialize(record),
                Out => TemplateValue::from_serialize(output),
            },
        )
    }

    fn render(&self, name: &str, ctx: TemplateValue) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|source| JexError::TemplateRender {
                name: name.to_string(),
                source,
            })?;
        template.render(ctx).map_err(|source| JexError::TemplateRender {
            name: name.to_string(),
            source,
        })
    }
}
