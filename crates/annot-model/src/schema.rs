//! Declarative table schema: column specs, checks and table-level policy.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Logical value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Float,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }

    /// Physical dtype name used in `dtype('...')` failure ids.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            ValueType::Integer => "int64",
            ValueType::Float => "float64",
            ValueType::String => "str",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "int64" => Ok(ValueType::Integer),
            "float" | "float64" | "double" => Ok(ValueType::Float),
            "string" | "str" | "text" => Ok(ValueType::String),
            _ => Err(format!("Unknown value type: {s}")),
        }
    }
}

/// A compiled regular expression that serializes as its source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidCheckPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Search semantics: the pattern may match anywhere in the value.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for Pattern {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self> {
        Pattern::new(&value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.regex.as_str().to_string()
    }
}

/// A value-level predicate attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Inclusive numeric bounds; at least one side must be set.
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Inclusive bounds on string length in characters.
    Length {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    /// Regex search over string values.
    Pattern { regex: Pattern },
    /// The value must parse as a molecular formula.
    Formula,
}

impl Check {
    pub fn greater_than_or_equal_to(min: f64) -> Self {
        Check::Range {
            min: Some(min),
            max: None,
        }
    }

    pub fn less_than_or_equal_to(max: f64) -> Self {
        Check::Range {
            min: None,
            max: Some(max),
        }
    }

    pub fn in_range(min: f64, max: f64) -> Self {
        Check::Range {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn str_length(min: usize, max: Option<usize>) -> Self {
        Check::Length {
            min: Some(min),
            max,
        }
    }

    pub fn str_contains(pattern: &str) -> Result<Self> {
        Ok(Check::Pattern {
            regex: Pattern::new(pattern)?,
        })
    }

    pub fn formula() -> Self {
        Check::Formula
    }

    /// Stable identifier reported in failure cases, e.g. `in_range(1, 25)`.
    pub fn id(&self) -> String {
        match self {
            Check::Range {
                min: Some(min),
                max: None,
            } => format!("greater_than_or_equal_to({min})"),
            Check::Range {
                min: None,
                max: Some(max),
            } => format!("less_than_or_equal_to({max})"),
            Check::Range { min, max } => {
                format!("in_range({}, {})", opt_to_string(min), opt_to_string(max))
            }
            Check::Length { min, max } => {
                format!("str_length({}, {})", opt_to_string(min), opt_to_string(max))
            }
            Check::Pattern { regex } => format!("str_contains('{}')", regex.as_str()),
            Check::Formula => "formula".to_string(),
        }
    }

    /// True for checks that only make sense on string columns.
    pub fn is_string_check(&self) -> bool {
        !matches!(self, Check::Range { .. })
    }

    fn validate(&self, column: &str, value_type: ValueType) -> Result<()> {
        let invalid_bounds = || SchemaError::InvalidBounds {
            column: column.to_string(),
            check: self.id(),
        };
        match self {
            Check::Range { min, max } => {
                if min.is_none() && max.is_none() {
                    return Err(invalid_bounds());
                }
                if min.is_some_and(|v| !v.is_finite()) || max.is_some_and(|v| !v.is_finite()) {
                    return Err(invalid_bounds());
                }
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(invalid_bounds());
                }
            }
            Check::Length { min, max } => {
                if min.is_none() && max.is_none() {
                    return Err(invalid_bounds());
                }
                if let (Some(lo), Some(hi)) = (min, max)
                    && lo > hi
                {
                    return Err(invalid_bounds());
                }
            }
            Check::Pattern { .. } | Check::Formula => {}
        }
        let compatible = if self.is_string_check() {
            value_type == ValueType::String
        } else {
            value_type.is_numeric()
        };
        if !compatible {
            return Err(SchemaError::IncompatibleCheck {
                column: column.to_string(),
                check: self.id(),
                value_type,
            });
        }
        Ok(())
    }
}

fn opt_to_string<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn default_true() -> bool {
    true
}

/// Declaration of one column (or a family of columns when `is_pattern`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name, or a regex matched against the start of column names.
    pub name: String,
    #[serde(default)]
    pub is_pattern: bool,
    pub value_type: ValueType,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub coerce: bool,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<Check>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColumnSpec {
    /// A required, non-nullable, non-unique column without checks.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            is_pattern: false,
            value_type,
            nullable: false,
            unique: false,
            coerce: false,
            required: true,
            checks: Vec::new(),
            description: None,
        }
    }

    /// A spec matching every column whose name starts with a match of `pattern`.
    pub fn pattern(pattern: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            is_pattern: true,
            ..Self::new(pattern, value_type)
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn with_checks(mut self, checks: impl IntoIterator<Item = Check>) -> Self {
        self.checks.extend(checks);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Which occurrences of a duplicated value are reported by uniqueness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportDuplicates {
    /// Every occurrence.
    #[default]
    All,
    /// Every occurrence except the first.
    ExcludeFirst,
    /// Every occurrence except the last.
    ExcludeLast,
}

impl ReportDuplicates {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportDuplicates::All => "all",
            ReportDuplicates::ExcludeFirst => "exclude_first",
            ReportDuplicates::ExcludeLast => "exclude_last",
        }
    }
}

impl fmt::Display for ReportDuplicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a column spec is matched against table column names.
#[derive(Debug, Clone)]
pub enum ColumnMatcher {
    Exact(String),
    Pattern(Regex),
}

impl ColumnMatcher {
    pub fn matches(&self, column: &str) -> bool {
        match self {
            ColumnMatcher::Exact(name) => name == column,
            ColumnMatcher::Pattern(regex) => regex.is_match(column),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, ColumnMatcher::Pattern(_))
    }
}

/// Serialized form of a [`Schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub coerce: bool,
    #[serde(default)]
    pub unique_column_names: bool,
    #[serde(default)]
    pub report_duplicates: ReportDuplicates,
}

/// A validated schema. Immutable once built; the policy setters return copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaDefinition", into = "SchemaDefinition")]
pub struct Schema {
    definition: SchemaDefinition,
    matchers: Vec<ColumnMatcher>,
}

impl Schema {
    /// Validate a definition and compile its column matchers.
    pub fn new(definition: SchemaDefinition) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut matchers = Vec::with_capacity(definition.columns.len());
        for spec in &definition.columns {
            if spec.name.is_empty() {
                return Err(SchemaError::EmptyColumnName);
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    name: spec.name.clone(),
                });
            }
            for check in &spec.checks {
                check.validate(&spec.name, spec.value_type)?;
            }
            matchers.push(compile_matcher(spec)?);
        }
        Ok(Self {
            definition,
            matchers,
        })
    }

    /// A schema with default policy over the given columns.
    pub fn from_columns(columns: impl IntoIterator<Item = ColumnSpec>) -> Result<Self> {
        Self::new(SchemaDefinition {
            columns: columns.into_iter().collect(),
            ..SchemaDefinition::default()
        })
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    pub fn title(&self) -> Option<&str> {
        self.definition.title.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.definition.version.as_deref()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.definition.columns
    }

    /// Column specs paired with their compiled matchers, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&ColumnSpec, &ColumnMatcher)> {
        self.definition.columns.iter().zip(self.matchers.iter())
    }

    /// Look up a non-pattern column spec by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.definition
            .columns
            .iter()
            .find(|spec| !spec.is_pattern && spec.name == name)
    }

    pub fn strict(&self) -> bool {
        self.definition.strict
    }

    pub fn coerce(&self) -> bool {
        self.definition.coerce
    }

    pub fn unique_column_names(&self) -> bool {
        self.definition.unique_column_names
    }

    pub fn report_duplicates(&self) -> ReportDuplicates {
        self.definition.report_duplicates
    }

    /// Whether values of `spec` are coerced before checks run.
    pub fn coerces(&self, spec: &ColumnSpec) -> bool {
        spec.coerce || self.definition.coerce
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.definition.strict = strict;
        self
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.definition.coerce = coerce;
        self
    }

    pub fn with_report_duplicates(mut self, mode: ReportDuplicates) -> Self {
        self.definition.report_duplicates = mode;
        self
    }

    pub fn with_unique_column_names(mut self, unique: bool) -> Self {
        self.definition.unique_column_names = unique;
        self
    }
}

impl TryFrom<SchemaDefinition> for Schema {
    type Error = SchemaError;

    fn try_from(value: SchemaDefinition) -> Result<Self> {
        Schema::new(value)
    }
}

impl From<Schema> for SchemaDefinition {
    fn from(value: Schema) -> Self {
        value.definition
    }
}

fn compile_matcher(spec: &ColumnSpec) -> Result<ColumnMatcher> {
    if !spec.is_pattern {
        return Ok(ColumnMatcher::Exact(spec.name.clone()));
    }
    let regex = Regex::new(&format!("^(?:{})", spec.name)).map_err(|source| {
        SchemaError::InvalidColumnPattern {
            name: spec.name.clone(),
            source,
        }
    })?;
    Ok(ColumnMatcher::Pattern(regex))
}

/// Incremental construction of a [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    definition: SchemaDefinition,
}

impl SchemaBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.definition.title = Some(title.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.definition.version = Some(version.into());
        self
    }

    pub fn column(mut self, spec: ColumnSpec) -> Self {
        self.definition.columns.push(spec);
        self
    }

    pub fn columns(mut self, specs: impl IntoIterator<Item = ColumnSpec>) -> Self {
        self.definition.columns.extend(specs);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.definition.strict = strict;
        self
    }

    pub fn coerce(mut self, coerce: bool) -> Self {
        self.definition.coerce = coerce;
        self
    }

    pub fn unique_column_names(mut self, unique: bool) -> Self {
        self.definition.unique_column_names = unique;
        self
    }

    pub fn report_duplicates(mut self, mode: ReportDuplicates) -> Self {
        self.definition.report_duplicates = mode;
        self
    }

    pub fn build(self) -> Result<Schema> {
        Schema::new(self.definition)
    }
}
