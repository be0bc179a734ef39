//! Recursive, shape-directed population of decode targets.

use crate::config::{DecoderConfig, UntaggedFields};
use crate::decode::integer;
use crate::error::{Error, Result};
use crate::query::QueryContext;
use crate::target::{Convert, FieldQuery, Mapping, Record, Sequence, Target};

/// One decode walk over a document.
///
/// Tracks the path of the field being decoded. On error the path is left
/// as it was at the failure point, so the entry point can report it.
pub(crate) struct Walker<'c> {
    config: &'c DecoderConfig,
    path: Vec<String>,
}

impl<'c> Walker<'c> {
    pub(crate) fn new(config: &'c DecoderConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
        }
    }

    /// Dotted path of the field being decoded, e.g. `rows[2].cells`.
    pub(crate) fn path(&self) -> String {
        let mut joined = String::new();
        for segment in &self.path {
            if !joined.is_empty() && !segment.starts_with('[') {
                joined.push('.');
            }
            joined.push_str(segment);
        }
        joined
    }

    pub(crate) fn decode(
        &mut self,
        ctx: QueryContext<'_, '_>,
        target: Target<'_>,
        expr: &str,
    ) -> Result<()> {
        match target {
            Target::Custom(converter) => self.convert(ctx, converter, expr),
            Target::Struct(record) => self.decode_struct(ctx, record, expr),
            Target::Sequence(sequence) => self.decode_sequence(ctx, sequence, expr),
            Target::Mapping(mapping) => self.decode_mapping(ctx, mapping, expr),
            Target::Text(slot) => {
                *slot = ctx.text(expr)?;
                Ok(())
            }
            Target::Integer(slot) => {
                let text = ctx.text(expr)?;
                integer::assign(slot, &text).map_err(|source| Error::Conversion {
                    expr: expr.to_string(),
                    text,
                    source: Box::new(source),
                })
            }
            Target::Unsupported(type_name) => Err(Error::UnsupportedType {
                type_name: type_name.to_string(),
            }),
        }
    }

    fn convert(
        &mut self,
        ctx: QueryContext<'_, '_>,
        converter: &mut dyn Convert,
        expr: &str,
    ) -> Result<()> {
        let text = ctx.text(expr)?;
        converter
            .convert(text.as_bytes())
            .map_err(|source| Error::Conversion {
                expr: expr.to_string(),
                text,
                source: source.into(),
            })
    }

    fn decode_struct(
        &mut self,
        ctx: QueryContext<'_, '_>,
        record: &mut dyn Record,
        expr: &str,
    ) -> Result<()> {
        let current = if expr.is_empty() {
            ctx
        } else {
            match ctx.search(expr)?.into_iter().next() {
                Some(first) => first,
                None => {
                    tracing::debug!(expr, record = record.type_name(), "no match for struct");
                    return Ok(());
                }
            }
        };

        let type_name = record.type_name();
        for (index, field) in record.fields().into_iter().enumerate() {
            let field_expr = match field.query {
                FieldQuery::Expr(field_expr) if !field_expr.is_empty() => field_expr,
                FieldQuery::Inherit => "",
                FieldQuery::Expr(_) | FieldQuery::Untagged if field.struct_kind => "",
                FieldQuery::Expr(_) | FieldQuery::Untagged => match self.config.untagged_fields {
                    UntaggedFields::Stop => {
                        tracing::debug!(
                            record = type_name,
                            field = field.name,
                            "untagged field, ignoring it and every later field"
                        );
                        break;
                    }
                    UntaggedFields::Skip => {
                        tracing::trace!(record = type_name, field = field.name, "untagged field skipped");
                        continue;
                    }
                },
            };

            let target = record
                .field_mut(index)
                .ok_or_else(|| Error::UnsupportedType {
                    type_name: format!("{type_name} (no field at index {index})"),
                })?;

            tracing::trace!(record = type_name, field = field.name, expr = field_expr, "decoding field");
            self.path.push(field.name.to_string());
            self.decode(current, target, field_expr)?;
            self.path.pop();
        }

        Ok(())
    }

    fn decode_sequence(
        &mut self,
        ctx: QueryContext<'_, '_>,
        sequence: &mut dyn Sequence,
        expr: &str,
    ) -> Result<()> {
        let matches = ctx.search(expr)?;
        if matches.is_empty() {
            tracing::debug!(expr, "no match for sequence");
            return Ok(());
        }

        sequence.rebuild(matches.len(), &mut |index, element| {
            self.path.push(format!("[{index}]"));
            self.decode(matches[index], element, "")?;
            self.path.pop();
            Ok(())
        })
    }

    fn decode_mapping(
        &mut self,
        ctx: QueryContext<'_, '_>,
        mapping: &mut dyn Mapping,
        expr: &str,
    ) -> Result<()> {
        let (key_expr, value_expr) = split_mapping_expr(expr)?;
        let keys = ctx.search(key_expr)?;
        let values = ctx.search(value_expr)?;

        let len = keys.len().min(values.len());
        if keys.len() != values.len() {
            tracing::debug!(
                expr,
                keys = keys.len(),
                values = values.len(),
                "mapping key and value counts differ, unpaired matches dropped"
            );
        }
        if len == 0 {
            return Ok(());
        }

        mapping.rebuild(len, &mut |index, key, value| {
            self.path.push(format!("[{index}]"));
            self.path.push("key".to_string());
            self.decode(keys[index], key, "")?;
            self.path.pop();
            self.path.push("value".to_string());
            self.decode(values[index], value, "")?;
            self.path.pop();
            self.path.pop();
            Ok(())
        })
    }
}

/// Split a mapping expression into its trimmed key and value expressions.
pub(crate) fn split_mapping_expr(expr: &str) -> Result<(&str, &str)> {
    let mut parts = expr.split(';').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => Ok((key, value)),
        _ => Err(Error::InvalidTag {
            expr: expr.to_string(),
        }),
    }
}
