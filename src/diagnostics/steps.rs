//! The individual diagnostics steps.
//!
//! Every step writes its output through the sink it is given and returns
//! `Err` on failure; whether that failure ends the run is the runner's call.

use std::fmt::Debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::env::Environment;
use crate::error::{DiagnosticsError, Result};
use crate::http::LoopbackClient;
use crate::model::{DemoRecord, TypeDescriptor};
use crate::observability::LogSink;
use crate::proxy::{self, Component};

pub const INVARIANT: &str = "invariant";
pub const INTROSPECT: &str = "introspect";
pub const PLACEHOLDERS: &str = "placeholders";
pub const CONSTRUCT: &str = "construct";
pub const FILE_READ: &str = "file_read";
pub const LOOPBACK: &str = "loopback";
pub const PROXY: &str = "proxy";
pub const MEMBERS: &str = "members";

/// Execution order of the sequence.
pub const ORDER: [&str; 8] = [
    INVARIANT,
    INTROSPECT,
    PLACEHOLDERS,
    CONSTRUCT,
    FILE_READ,
    LOOPBACK,
    PROXY,
    MEMBERS,
];

const LIST_IS_NULL: &str = "The list can't be null";

pub fn check_invariant(sink: &dyn LogSink, record: &DemoRecord) -> Result<()> {
    match record.list() {
        Some(_) => Ok(()),
        None => {
            sink.error(INVARIANT, LIST_IS_NULL);
            Err(DiagnosticsError::Invariant(LIST_IS_NULL))
        }
    }
}

pub fn introspect<T>(sink: &dyn LogSink, descriptor: &TypeDescriptor<T>) -> Result<()> {
    for property in descriptor.properties {
        sink.info(INTROSPECT, &format!("pd : {}", property.name));
    }
    Ok(())
}

pub fn resolve_template(sink: &dyn LogSink, env: &Environment, template: &str) -> Result<String> {
    let resolved = env.resolve_placeholders(template)?;
    sink.info(PLACEHOLDERS, &format!("Resolved Text : {}", resolved));
    Ok(resolved)
}

pub fn construct<T: Debug>(sink: &dyn LogSink, descriptor: &TypeDescriptor<T>) -> Result<T> {
    let signature = descriptor.constructor_signature().unwrap_or("none");
    sink.info(CONSTRUCT, &format!("Demo Class Constructor : {}", signature));

    let instance = match descriptor.instantiate() {
        Some(Ok(instance)) => instance,
        Some(Err(e)) => return Err(DiagnosticsError::Construction(e.to_string())),
        None => {
            return Err(DiagnosticsError::Construction(format!(
                "{} has no zero-argument constructor",
                descriptor.name
            )))
        }
    };

    sink.info(CONSTRUCT, &format!("New Instance demo class : {:?}", instance));
    Ok(instance)
}

/// Reads `${user.home}/<relative>` and logs its contents verbatim.
pub fn read_content(sink: &dyn LogSink, env: &Environment, relative: &str) -> Result<String> {
    let home = env.resolve_placeholders("${user.home}").inspect_err(|e| {
        sink.error(FILE_READ, &e.to_string());
    })?;
    let path = join_relative(Path::new(&home), relative);

    match read_scoped(&path) {
        Ok(contents) => {
            sink.info(FILE_READ, &contents);
            Ok(contents)
        }
        Err(source) => {
            let err = DiagnosticsError::FileRead { path, source };
            sink.error(FILE_READ, &err.to_string());
            Err(err)
        }
    }
}

/// Joins a `/` or `\` separated relative path onto `base` using the host separator.
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |path, segment| path.join(segment))
}

// The handle is dropped on every return path, including `?`.
fn read_scoped(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

pub async fn loopback(sink: &dyn LogSink, client: &LoopbackClient, url: &str) -> Result<()> {
    let status = client.get(url).await?;
    sink.info(LOOPBACK, &format!("Loopback GET {} -> {}", url, status));
    Ok(())
}

pub fn inspect_proxy(sink: &dyn LogSink, component: &dyn Component) -> Result<()> {
    let info = proxy::inspect(component);
    sink.info(PROXY, &format!("Class is : {}", info.target_type));
    sink.info(PROXY, &format!("Is AOP Proxy : {}", info.is_proxy()));
    sink.info(PROXY, &format!("Is Static Proxy : {}", info.is_static_proxy()));
    sink.info(PROXY, &format!("Is Dynamic Proxy : {}", info.is_dynamic_proxy()));
    Ok(())
}

pub fn enumerate_members<T>(
    sink: &dyn LogSink,
    descriptor: &TypeDescriptor<T>,
    field_name: &str,
) -> Result<()> {
    for field in descriptor.fields {
        sink.info(MEMBERS, &format!("field : {}", field));
    }
    for method in descriptor.methods {
        sink.info(MEMBERS, &format!("method = {}", method.signature));
    }

    let field = descriptor
        .find_field(field_name)
        .ok_or_else(|| DiagnosticsError::UnknownField(field_name.to_string()))?;
    sink.info(MEMBERS, &field.to_string());
    sink.info(MEMBERS, &format!("Resolvable type : {}", field.ty));
    Ok(())
}
