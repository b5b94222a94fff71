// file: src/stack/mod.rs
// description: declarative resource ledger and declaration module exports
// reference: internal module structure

pub mod iam;
pub mod lambda;
pub mod objects;

pub use iam::{PolicyHandle, RoleHandle};
pub use lambda::{FunctionHandle, LayerHandle};
pub use objects::BucketHandle;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Policy,
    Role,
    RolePolicyAttachment,
    LayerVersion,
    Function,
    Bucket,
    Object,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Policy => "iam/policy",
            ResourceKind::Role => "iam/role",
            ResourceKind::RolePolicyAttachment => "iam/role-policy-attachment",
            ResourceKind::LayerVersion => "lambda/layer-version",
            ResourceKind::Function => "lambda/function",
            ResourceKind::Bucket => "s3/bucket",
            ResourceKind::Object => "s3/object",
        }
    }
}

/// One declared resource: what it is, what we called it, and the identifier
/// the endpoint assigned.
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub name: String,
    pub id: String,
    pub declared_at: DateTime<Utc>,
}

/// The declarative resource graph for one deployment run. Declarations are
/// recorded in the order they are applied.
#[derive(Debug, Clone)]
pub struct Stack {
    pub name: String,
    pub env: String,
    records: Vec<ResourceRecord>,
}

impl Stack {
    pub fn new(name: &str) -> Self {
        let env = name.rsplit('.').next().unwrap_or(name).to_string();
        Self {
            name: name.to_string(),
            env,
            records: Vec::new(),
        }
    }

    /// Resource names carry the environment suffix so that stacks sharing an
    /// endpoint do not collide.
    pub fn scoped_name(&self, base: &str) -> String {
        format!("{base}-{}", self.env)
    }

    pub fn record(&mut self, kind: ResourceKind, name: impl Into<String>, id: impl Into<String>) {
        self.records.push(ResourceRecord {
            kind,
            name: name.into(),
            id: id.into(),
            declared_at: Utc::now(),
        });
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stack_environment_and_scoping() {
        let stack = Stack::new("stackform.prod");
        assert_eq!(stack.env, "prod");
        assert_eq!(stack.scoped_name("upload"), "upload-prod");
    }

    #[test]
    fn test_records_preserve_declaration_order() {
        let mut stack = Stack::new("stackform.dev");
        stack.record(ResourceKind::Policy, "logging-dev", "arn:aws:iam::000000000000:policy/logging-dev");
        stack.record(ResourceKind::Role, "exec-dev", "arn:aws:iam::000000000000:role/exec-dev");

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.records()[0].kind, ResourceKind::Policy);
        assert_eq!(stack.records()[1].kind, ResourceKind::Role);
    }

    #[test]
    fn test_resource_kind_labels() {
        assert_eq!(ResourceKind::Bucket.as_str(), "s3/bucket");
        assert_eq!(ResourceKind::Function.as_str(), "lambda/function");
    }
}
