//! Declared-type resolution for schema columns.
use crate::ir::{ColumnDescriptor, InferredType};
use crate::mapping::TypeMapping;

/// Resolve a column against a dialect's table. First match wins:
/// decimal → number, enum → string, nullable → widened lookup, else lookup.
pub fn resolve(column: &ColumnDescriptor, mapping: &TypeMapping) -> InferredType {
    let dialect = mapping.dialect();
    if column.is_decimal {
        return InferredType::from(dialect.number());
    }
    if column.is_enum {
        return InferredType::from(dialect.string());
    }
    let base = mapping.lookup(&column.declared_type);
    if column.nullable {
        InferredType::new(dialect.nullable(base))
    } else {
        InferredType::from(base)
    }
}

/// Resolve every column, keeping order.
pub fn resolve_all<'a, I>(columns: I, mapping: &TypeMapping) -> Vec<(String, InferredType)>
where
    I: IntoIterator<Item = &'a ColumnDescriptor>,
{
    columns.into_iter()
        .map(|c| (c.name.clone(), resolve(c, mapping)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn ts() -> TypeMapping { TypeMapping::builtin(Dialect::TypeScript) }
    fn js() -> TypeMapping { TypeMapping::builtin(Dialect::JsDoc) }

    #[test]
    fn mapped_types_resolve_exactly() {
        let table = ts();
        for (declared, annotation) in table.iter() {
            let col = ColumnDescriptor::new("c", declared);
            assert_eq!(resolve(&col, &table), annotation);
        }
    }

    #[test]
    fn unmapped_types_resolve_to_sentinel() {
        assert_eq!(resolve(&ColumnDescriptor::new("c", "geography"), &ts()), "any");
        assert_eq!(resolve(&ColumnDescriptor::new("c", ""), &ts()), "any");
        assert_eq!(resolve(&ColumnDescriptor::new("c", "geography"), &js()), "*");
    }

    #[test]
    fn decimal_beats_enum_beats_nullable() {
        let col = ColumnDescriptor::new("price", "varchar").decimal(true).enumeration(true).nullable(true);
        assert_eq!(resolve(&col, &ts()), "number");
        let col = ColumnDescriptor::new("status", "varchar").enumeration(true).nullable(true);
        assert_eq!(resolve(&col, &ts()), "string");
    }

    #[test]
    fn nullable_union_only_in_typescript() {
        let col = ColumnDescriptor::new("deleted_at", "timestamp").nullable(true);
        assert_eq!(resolve(&col, &ts()), "string | null");
        assert_eq!(resolve(&col, &js()), "string");
        let col = ColumnDescriptor::new("blob", "geometry").nullable(true);
        assert_eq!(resolve(&col, &ts()), "any | null");
    }

    #[test]
    fn resolve_all_keeps_column_order() {
        let cols = [
            ColumnDescriptor::new("id", "bigint"),
            ColumnDescriptor::new("name", "varchar"),
            ColumnDescriptor::new("is_admin", "boolean"),
        ];
        let fields = resolve_all(&cols, &ts());
        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["id", "name", "is_admin"]);
        assert_eq!(fields[2].1, "boolean");
    }
}
