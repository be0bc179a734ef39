//! Compiled XPath evaluation with a bounded compilation cache.
//!
//! Compiling an expression is far more expensive than running it, and a
//! decode walk runs the same field expressions once per sequence element.
//! The cache lives inside the evaluator, so it never outlives one decode
//! call. It is capped; when full it is cleared and rebuilt on demand.

use crate::error::{Error, Result};
use crate::query::functions;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Engine for compiling and running XPath expressions against one document.
pub struct XPathEvaluator<'d> {
    factory: Factory,
    context: Context<'d>,
    compiled: RefCell<HashMap<String, Rc<XPath>>>,
    capacity: usize,
}

impl<'d> XPathEvaluator<'d> {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create an evaluator caching at most `capacity` compiled expressions.
    /// A capacity of zero disables caching.
    pub fn with_cache_capacity(capacity: usize) -> Self {
        let mut context = Context::new();
        functions::register(&mut context);

        Self {
            factory: Factory::new(),
            context,
            compiled: RefCell::new(HashMap::new()),
            capacity,
        }
    }

    /// Compile an expression, or fetch it from the cache.
    pub fn compile(&self, expr: &str) -> Result<Rc<XPath>> {
        if expr.trim().is_empty() {
            return Err(Error::QuerySyntax {
                expr: expr.to_string(),
                message: "empty expression".to_string(),
            });
        }
        if let Some(xpath) = self.compiled.borrow().get(expr) {
            return Ok(Rc::clone(xpath));
        }

        let xpath = self
            .factory
            .build(expr)
            .map_err(|err| Error::QuerySyntax {
                expr: expr.to_string(),
                message: err.to_string(),
            })?
            .ok_or_else(|| Error::QuerySyntax {
                expr: expr.to_string(),
                message: "empty expression".to_string(),
            })?;
        let xpath = Rc::new(xpath);

        if self.capacity > 0 {
            let mut compiled = self.compiled.borrow_mut();
            if compiled.len() >= self.capacity {
                tracing::trace!(capacity = self.capacity, "xpath cache full, clearing");
                compiled.clear();
            }
            compiled.insert(expr.to_string(), Rc::clone(&xpath));
        }

        Ok(xpath)
    }

    /// Evaluate `expr` with `node` as the context node.
    pub fn evaluate(&self, node: Node<'d>, expr: &str) -> Result<Value<'d>> {
        let xpath = self.compile(expr)?;
        xpath
            .evaluate(&self.context, node)
            .map_err(|err| Error::QueryEvaluation {
                expr: expr.to_string(),
                message: err.to_string(),
            })
    }

    /// Number of compiled expressions currently cached.
    pub fn cached_queries(&self) -> usize {
        self.compiled.borrow().len()
    }
}

impl Default for XPathEvaluator<'_> {
    fn default() -> Self {
        Self::new()
    }
}
