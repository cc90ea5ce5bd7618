//! Identifier generation.
//!
//! # Responsibilities
//! - Mirror the shape of the handler tree
//! - Hold one generator per handler, producing `RouteId + payload`
//! - Resolve generators by name or separator-joined path
//!
//! # Design Decisions
//! - Immutable after construction (shareable without locks)
//! - Independent of the context type: rendering an identifier never needs
//!   the context the handler will later receive
//! - Budget overruns are errors, never truncation

use serde::Serialize;

use crate::codec::{Codec, EncodeError};
use crate::config::FlareConfig;
use crate::routing::hash;
use crate::routing::types::RouteId;

/// Renders identifiers for one route.
#[derive(Debug, Clone)]
pub struct Generator {
    route_id: RouteId,
    route_path: String,
    params: usize,
    codec: Codec,
    payload_limit: usize,
}

impl Generator {
    pub fn new(route_path: impl Into<String>, params: usize, config: &FlareConfig) -> Self {
        let route_path = route_path.into();
        Self {
            route_id: hash::route_id(&route_path, params, config.routing.id_width),
            route_path,
            params,
            codec: Codec::from_config(config),
            payload_limit: config.payload_limit(),
        }
    }

    /// Identifier for invoking this route with `args`.
    ///
    /// `args` must serialize to a JSON array (tuples, slices, `Vec`s,
    /// `json!([..])`) holding at most `params` values.
    pub fn id<A: Serialize + ?Sized>(&self, args: &A) -> Result<String, EncodeError> {
        let values = Codec::to_list(args)?;
        if values.len() > self.params {
            return Err(EncodeError::TooManyArgs {
                route: self.route_path.clone(),
                given: values.len(),
                params: self.params,
            });
        }

        let payload = self.codec.encode_list(&values, self.payload_limit)?;
        Ok(format!("{}{}", self.route_id, payload))
    }

    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    pub fn params(&self) -> usize {
        self.params
    }
}

/// A position in the mirrored tree.
#[derive(Debug, Clone)]
pub enum RouterNode {
    Generator(Generator),
    Branch(Router),
}

/// The mirrored tree: same names as the handler tree, generators at the leaves.
#[derive(Debug, Clone)]
pub struct Router {
    separator: String,
    children: Vec<(String, RouterNode)>,
}

impl Router {
    pub(crate) fn new(separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
            children: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, node: RouterNode) {
        self.children.push((name.to_string(), node));
    }

    /// Direct child named `name`.
    pub fn get(&self, name: &str) -> Option<&RouterNode> {
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, node)| node)
    }

    /// Nested branch named `name`.
    pub fn branch(&self, name: &str) -> Option<&Router> {
        match self.get(name)? {
            RouterNode::Branch(router) => Some(router),
            RouterNode::Generator(_) => None,
        }
    }

    /// Generator at a separator-joined path such as `page/open` or `/page/open`.
    pub fn generator(&self, path: &str) -> Option<&Generator> {
        let path = path.strip_prefix(self.separator.as_str()).unwrap_or(path);
        let mut segments = path.split(self.separator.as_str()).peekable();
        let mut current = self;

        while let Some(segment) = segments.next() {
            match (current.get(segment)?, segments.peek()) {
                (RouterNode::Generator(generator), None) => return Some(generator),
                (RouterNode::Branch(router), Some(_)) => current = router,
                _ => return None,
            }
        }
        None
    }

    /// Identifier for the route at `path` invoked with `args`.
    pub fn id<A: Serialize + ?Sized>(&self, path: &str, args: &A) -> Result<String, EncodeError> {
        self.generator(path)
            .ok_or_else(|| EncodeError::UnknownRoute(path.to_string()))?
            .id(args)
    }

    /// Every generator in the tree, depth-first in definition order.
    pub fn routes(&self) -> Vec<&Generator> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Generator>) {
        for (_, node) in &self.children {
            match node {
                RouterNode::Generator(generator) => out.push(generator),
                RouterNode::Branch(router) => router.collect(out),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
