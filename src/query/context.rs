use crate::error::Result;
use crate::query::evaluator::XPathEvaluator;
use sxd_xpath::nodeset::Node;
use sxd_xpath::Value;

/// A document node paired with the evaluator used to query beneath it.
#[derive(Clone, Copy)]
pub struct QueryContext<'a, 'd> {
    node: Node<'d>,
    evaluator: &'a XPathEvaluator<'d>,
}

impl<'a, 'd> QueryContext<'a, 'd> {
    pub fn new(node: Node<'d>, evaluator: &'a XPathEvaluator<'d>) -> Self {
        Self { node, evaluator }
    }

    /// One context per node selected by `expr`, in document order.
    ///
    /// Expressions that evaluate to a string, number or boolean select no
    /// nodes and yield an empty result.
    pub fn search(&self, expr: &str) -> Result<Vec<QueryContext<'a, 'd>>> {
        match self.evaluator.evaluate(self.node, expr)? {
            Value::Nodeset(nodes) => {
                let matches: Vec<_> = nodes
                    .document_order()
                    .into_iter()
                    .map(|node| QueryContext::new(node, self.evaluator))
                    .collect();
                tracing::trace!(expr, matches = matches.len(), "xpath search");
                Ok(matches)
            }
            scalar => {
                tracing::debug!(
                    expr,
                    value = %scalar.string(),
                    "xpath search produced a scalar, treating as no matches"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Text content selected by `expr`.
    ///
    /// An empty expression yields the full text of this node. A node-set
    /// yields the text of its first node in document order, or `""` when
    /// nothing matched. Scalar results are converted to their string form.
    pub fn text(&self, expr: &str) -> Result<String> {
        if expr.is_empty() {
            return Ok(self.node.string_value());
        }

        let text = match self.evaluator.evaluate(self.node, expr)? {
            Value::Nodeset(nodes) => nodes
                .document_order_first()
                .map(|node| node.string_value())
                .unwrap_or_default(),
            scalar => scalar.string(),
        };
        Ok(text)
    }
}

impl std::fmt::Debug for QueryContext<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryContext")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}
