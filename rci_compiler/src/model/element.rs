//! Leaf elements and their per-type validation rules

use super::condition::RegexCase;
use super::error::{Bound, ModelError, ModelResult};
use super::item::{AccessType, EnumValue, ItemInfo, Reference};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

const INT32_RANGE: RangeInclusive<i64> = -2_147_483_648..=2_147_483_647;
const UINT32_RANGE: RangeInclusive<i64> = 0..=4_294_967_295;

/// Value types understood by the device protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    String,
    MultilineString,
    Password,
    Int32,
    Uint32,
    Hex32,
    #[serde(rename = "0x_hex32")]
    XHex32,
    Float,
    Enum,
    OnOff,
    Boolean,
    Ipv4,
    Fqdnv4,
    Fqdnv6,
    List,
    MacAddr,
    Datetime,
    RefEnum,
}

impl ElementType {
    pub const ALL: [ElementType; 18] = [
        ElementType::String,
        ElementType::MultilineString,
        ElementType::Password,
        ElementType::Int32,
        ElementType::Uint32,
        ElementType::Hex32,
        ElementType::XHex32,
        ElementType::Float,
        ElementType::Enum,
        ElementType::OnOff,
        ElementType::Boolean,
        ElementType::Ipv4,
        ElementType::Fqdnv4,
        ElementType::Fqdnv6,
        ElementType::List,
        ElementType::MacAddr,
        ElementType::Datetime,
        ElementType::RefEnum,
    ];

    pub fn parse(value: &str) -> ModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ModelError::InvalidElementType {
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::String => "string",
            ElementType::MultilineString => "multiline_string",
            ElementType::Password => "password",
            ElementType::Int32 => "int32",
            ElementType::Uint32 => "uint32",
            ElementType::Hex32 => "hex32",
            ElementType::XHex32 => "0x_hex32",
            ElementType::Float => "float",
            ElementType::Enum => "enum",
            ElementType::OnOff => "on_off",
            ElementType::Boolean => "boolean",
            ElementType::Ipv4 => "ipv4",
            ElementType::Fqdnv4 => "fqdnv4",
            ElementType::Fqdnv6 => "fqdnv6",
            ElementType::List => "list",
            ElementType::MacAddr => "mac_addr",
            ElementType::Datetime => "datetime",
            ElementType::RefEnum => "ref_enum",
        }
    }

    /// Type identifier on the wire
    pub fn wire_value(&self) -> u32 {
        match self {
            ElementType::String => 1,
            ElementType::MultilineString => 2,
            ElementType::Password => 3,
            ElementType::Int32 => 4,
            ElementType::Uint32 => 5,
            ElementType::Hex32 => 6,
            ElementType::XHex32 => 7,
            ElementType::Float => 8,
            ElementType::Enum => 9,
            ElementType::OnOff => 11,
            ElementType::Boolean => 12,
            ElementType::Ipv4 => 13,
            ElementType::Fqdnv4 => 14,
            ElementType::Fqdnv6 => 15,
            ElementType::List => 17,
            ElementType::MacAddr => 21,
            ElementType::Datetime => 22,
            ElementType::RefEnum => 23,
        }
    }

    pub fn supports_min_max(&self) -> bool {
        matches!(
            self,
            ElementType::String
                | ElementType::MultilineString
                | ElementType::Password
                | ElementType::Int32
                | ElementType::Uint32
                | ElementType::Hex32
                | ElementType::XHex32
                | ElementType::Float
                | ElementType::Fqdnv4
                | ElementType::Fqdnv6
        )
    }

    /// Writable elements of these types must declare `max`
    pub fn requires_max(&self) -> bool {
        matches!(
            self,
            ElementType::String
                | ElementType::MultilineString
                | ElementType::Password
                | ElementType::Fqdnv4
                | ElementType::Fqdnv6
        )
    }

    fn is_string_like(&self) -> bool {
        matches!(
            self,
            ElementType::String | ElementType::MultilineString | ElementType::Password
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn ipv4_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])[.](25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])[.](25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])[.](25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])$",
        )
        .expect("valid IPv4 pattern")
    })
}

fn fqdn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[a-zA-Z]+://)?(?:[A-Za-z0-9-]*(?:[.]|::?)[A-Za-z0-9-]*)+(?::[0-9]+)?$")
            .expect("valid FQDN pattern")
    })
}

/// Parse a decimal or `0x` hexadecimal integer bounded by `range`
fn to_long(text: &str, range: &RangeInclusive<i64>, bound: Bound) -> ModelResult<i64> {
    let (digits, radix) = match text.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };

    let value =
        i64::from_str_radix(digits, radix).map_err(|_| ModelError::ValueInvalid { bound })?;
    if value < *range.start() {
        return Err(ModelError::BelowMinimum { bound });
    }
    if value > *range.end() {
        return Err(ModelError::AboveMaximum { bound });
    }
    Ok(value)
}

fn to_float(text: &str, bound: Bound) -> ModelResult<f32> {
    match text.parse::<f32>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ModelError::ValueInvalid { bound }),
    }
}

/// Optional regular expression constraint on an element's value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegexRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<RegexCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
}

impl RegexRule {
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.case.is_none() && self.syntax.is_none()
    }

    fn validate(&self) -> ModelResult<()> {
        if self.is_empty() || (self.pattern.is_some() && self.syntax.is_some()) {
            Ok(())
        } else {
            Err(ModelError::IncompleteRegex)
        }
    }
}

/// A typed leaf value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    #[serde(flatten)]
    info: ItemInfo,
    #[serde(rename = "type")]
    element_type: Option<ElementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<String>,
    #[serde(skip_serializing_if = "RegexRule::is_empty")]
    regex: RegexRule,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<EnumValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    refs: Vec<Reference>,
}

fn set_once(slot: &mut Option<String>, keyword: &'static str, value: String) -> ModelResult<()> {
    if slot.is_some() {
        return Err(ModelError::DuplicateKeyword { keyword, value });
    }
    *slot = Some(value);
    Ok(())
}

impl Element {
    pub fn new(info: ItemInfo) -> Self {
        Self {
            info,
            element_type: None,
            min: None,
            max: None,
            default: None,
            units: None,
            regex: RegexRule::default(),
            values: Vec::new(),
            refs: Vec::new(),
        }
    }

    pub fn info(&self) -> &ItemInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut ItemInfo {
        &mut self.info
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn element_type(&self) -> Option<ElementType> {
        self.element_type
    }

    pub fn min(&self) -> Option<&str> {
        self.min.as_deref()
    }

    pub fn max(&self) -> Option<&str> {
        self.max.as_deref()
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn regex(&self) -> &RegexRule {
        &self.regex
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    pub fn refs(&self) -> &[Reference] {
        &self.refs
    }

    pub fn set_type(&mut self, value: &str) -> ModelResult<ElementType> {
        if self.element_type.is_some() {
            return Err(ModelError::DuplicateKeyword {
                keyword: "type",
                value: value.to_string(),
            });
        }
        let element_type = ElementType::parse(value)?;
        self.element_type = Some(element_type);
        Ok(element_type)
    }

    pub fn set_min(&mut self, value: String) -> ModelResult<()> {
        set_once(&mut self.min, "min", value)
    }

    pub fn set_max(&mut self, value: String) -> ModelResult<()> {
        set_once(&mut self.max, "max", value)
    }

    pub fn set_default(&mut self, value: String) -> ModelResult<()> {
        set_once(&mut self.default, "default", value)
    }

    pub fn set_units(&mut self, value: String) -> ModelResult<()> {
        set_once(&mut self.units, "units", value)
    }

    pub fn set_pattern(&mut self, pattern: &str) -> ModelResult<()> {
        Regex::new(pattern).map_err(|e| ModelError::InvalidPattern {
            reason: e.to_string(),
        })?;
        self.regex.pattern = Some(pattern.to_string());
        Ok(())
    }

    pub fn set_regex_case(&mut self, case: RegexCase) {
        self.regex.case = Some(case);
    }

    pub fn set_syntax(&mut self, syntax: String) {
        self.regex.syntax = Some(syntax);
    }

    /// Type that decides how the next `value` name is read
    pub fn member_type(&self) -> ModelResult<ElementType> {
        match self.element_type {
            None => Err(ModelError::ValueWithoutType {
                element: self.name().to_string(),
            }),
            Some(t @ (ElementType::Enum | ElementType::RefEnum)) => Ok(t),
            Some(element_type) => Err(ModelError::ValueNotAllowed { element_type }),
        }
    }

    pub fn add_value(&mut self, value: EnumValue) -> ModelResult<()> {
        self.member_type()?;
        if self.values.iter().any(|v| v.name() == value.name()) {
            return Err(ModelError::DuplicateValue {
                name: value.name().to_string(),
            });
        }
        self.values.push(value);
        Ok(())
    }

    pub fn add_ref(&mut self, reference: Reference) -> ModelResult<()> {
        match self.member_type()? {
            ElementType::RefEnum => {}
            element_type => return Err(ModelError::ValueNotAllowed { element_type }),
        }
        if self.refs.iter().any(|r| r.path() == reference.path()) {
            return Err(ModelError::DuplicateValue {
                name: reference.path().to_string(),
            });
        }
        self.refs.push(reference);
        Ok(())
    }

    fn value_index(&self, name: &str) -> Option<usize> {
        self.values.iter().position(|v| v.name() == name)
    }

    /// Check everything that can be decided from this element alone
    pub fn validate(&self) -> ModelResult<()> {
        let element_type = self.element_type.ok_or(ModelError::MissingType)?;

        if !element_type.supports_min_max() {
            if self.min.is_some() {
                return Err(ModelError::RangeNotSupported { bound: Bound::Min });
            }
            if self.max.is_some() {
                return Err(ModelError::RangeNotSupported { bound: Bound::Max });
            }
        }

        if element_type.requires_max()
            && self.info.access() != Some(AccessType::ReadOnly)
            && self.max.is_none()
        {
            return Err(ModelError::MaxRequired);
        }

        self.regex.validate()?;

        let default = self.default.as_deref();
        match element_type {
            ElementType::Enum => {
                if self.values.is_empty() {
                    return Err(ModelError::NoEnumValues);
                }
                if default.is_some_and(|d| self.value_index(d).is_none()) {
                    return Err(ModelError::DefaultNotEnumerated);
                }
            }
            ElementType::RefEnum => {
                if self.values.is_empty() && self.refs.is_empty() {
                    return Err(ModelError::NoRefEnumValues);
                }
                if let Some(default) = default {
                    let found = self.value_index(default).is_some()
                        || self.refs.iter().any(|r| default.starts_with(r.path()));
                    if !found {
                        return Err(ModelError::DefaultNotEnumerated);
                    }
                }
            }
            ElementType::OnOff | ElementType::Boolean => {
                let allowed: [&str; 2] = if element_type == ElementType::OnOff {
                    ["on", "off"]
                } else {
                    ["true", "false"]
                };
                if default.is_some_and(|d| !allowed.contains(&d)) {
                    return Err(ModelError::BadDefaultLiteral { element_type });
                }
            }
            ElementType::Ipv4 => {
                if default.is_some_and(|d| !ipv4_pattern().is_match(d)) {
                    return Err(ModelError::InvalidIpv4);
                }
            }
            ElementType::List => {
                if default.is_some() {
                    return Err(ModelError::ListDefault);
                }
            }
            ElementType::MacAddr | ElementType::Datetime => {
                if default.is_some() {
                    return Err(ModelError::DefaultUnsupported { element_type });
                }
            }
            ElementType::Float => self.validate_float_range()?,
            ElementType::Int32 => self.validate_integer_range(&INT32_RANGE, element_type)?,
            _ => self.validate_integer_range(&UINT32_RANGE, element_type)?,
        }

        Ok(())
    }

    fn validate_float_range(&self) -> ModelResult<()> {
        let min = match self.min.as_deref() {
            Some(text) => to_float(text, Bound::Min)?,
            None => -f32::MAX,
        };
        let max = match self.max.as_deref() {
            Some(text) => to_float(text, Bound::Max)?,
            None => f32::MAX,
        };
        if min > max {
            return Err(ModelError::MinAboveMax);
        }

        if let Some(text) = self.default.as_deref() {
            let value = to_float(text, Bound::Default)?;
            if value < min || value > max {
                return Err(ModelError::DefaultOutOfRange);
            }
        }
        Ok(())
    }

    fn validate_integer_range(
        &self,
        range: &RangeInclusive<i64>,
        element_type: ElementType,
    ) -> ModelResult<()> {
        let min = match self.min.as_deref() {
            Some(text) => to_long(text, range, Bound::Min)?,
            None => *range.start(),
        };
        let max = match self.max.as_deref() {
            Some(text) => to_long(text, range, Bound::Max)?,
            None => *range.end(),
        };
        if min > max {
            return Err(ModelError::MinAboveMax);
        }

        let Some(default) = self.default.as_deref() else {
            return Ok(());
        };

        let in_range = |value: i64| {
            if (min..=max).contains(&value) {
                Ok(())
            } else {
                Err(ModelError::DefaultOutOfRange)
            }
        };

        match element_type {
            _ if element_type.is_string_like() => in_range(default.chars().count() as i64),
            ElementType::Fqdnv4 | ElementType::Fqdnv6 => {
                if fqdn_pattern().is_match(default) {
                    Ok(())
                } else {
                    Err(ModelError::InvalidFqdn)
                }
            }
            _ => in_range(to_long(default, range, Bound::Default)?),
        }
    }

    /// Default rendered as a C initializer for code generation
    pub fn default_value(&self) -> Option<String> {
        let default = self.default.as_deref()?;
        match self.element_type? {
            ElementType::String
            | ElementType::MultilineString
            | ElementType::Password
            | ElementType::Ipv4
            | ElementType::Fqdnv4
            | ElementType::Fqdnv6
            | ElementType::MacAddr
            | ElementType::Datetime
            | ElementType::RefEnum => Some(format!("\"{}\"", default)),
            ElementType::Int32
            | ElementType::Uint32
            | ElementType::Hex32
            | ElementType::XHex32
            | ElementType::Float => Some(default.to_string()),
            ElementType::Enum => self.value_index(default).map(|i| i.to_string()),
            ElementType::OnOff | ElementType::Boolean => Some(format!("connector_{}", default)),
            ElementType::List => None,
        }
    }

    /// Record the length range computed for a `ref_enum`
    pub fn set_resolved_range(&mut self, min: usize, max: usize) {
        self.min = Some(min.to_string());
        self.max = Some(max.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn typed(element_type: &str) -> Element {
        let mut element =
            Element::new(ItemInfo::new("e1", Some("E1".to_string()), None).unwrap());
        element.set_type(element_type).unwrap();
        element
    }

    fn with(element_type: &str, min: Option<&str>, max: Option<&str>, default: Option<&str>) -> Element {
        let mut element = typed(element_type);
        if let Some(min) = min {
            element.set_min(min.to_string()).unwrap();
        }
        if let Some(max) = max {
            element.set_max(max.to_string()).unwrap();
        }
        if let Some(default) = default {
            element.set_default(default.to_string()).unwrap();
        }
        element
    }

    fn value(name: &str) -> EnumValue {
        EnumValue::new(name, None, None).unwrap()
    }

    #[test]
    fn test_type_names_and_wire_values() {
        assert_eq!(ElementType::parse("0X_HEX32"), Ok(ElementType::XHex32));
        assert_eq!(ElementType::parse("ref_enum").map(|t| t.wire_value()), Ok(23));
        assert_eq!(ElementType::MacAddr.wire_value(), 21);
        assert_eq!(
            ElementType::parse("uint64").unwrap_err().to_string(),
            "Invalid element Type: uint64"
        );
        assert_eq!(
            serde_json::to_value(ElementType::XHex32).unwrap(),
            serde_json::json!("0x_hex32")
        );
    }

    #[test]
    fn test_keywords_are_set_once() {
        let mut element = with("int32", Some("0"), None, None);
        assert_eq!(
            element.set_min("1".to_string()).unwrap_err().to_string(),
            "Duplicate <min> keyword: 1"
        );
        assert_matches!(
            element.set_type("uint32"),
            Err(ModelError::DuplicateKeyword { keyword: "type", .. })
        );
    }

    #[test]
    fn test_int32_range_and_default() {
        let element = with("int32", Some("0"), Some("10"), Some("5"));
        assert!(element.validate().is_ok());
        assert_eq!(element.default_value().as_deref(), Some("5"));

        let element = with("int32", Some("0"), Some("10"), Some("20"));
        assert_eq!(element.validate(), Err(ModelError::DefaultOutOfRange));

        let element = with("int32", Some("0x10"), Some("0x0f"), None);
        assert_eq!(element.validate(), Err(ModelError::MinAboveMax));

        let element = with("int32", Some("-2147483649"), None, None);
        assert_eq!(
            element.validate().unwrap_err().to_string(),
            "min value is below protocol minimum"
        );

        let element = with("int32", None, Some("ten"), None);
        assert_eq!(element.validate().unwrap_err().to_string(), "max value invalid");
    }

    #[test]
    fn test_uint32_and_string_lengths() {
        let element = with("uint32", Some("-1"), None, None);
        assert_eq!(
            element.validate(),
            Err(ModelError::BelowMinimum { bound: Bound::Min })
        );

        let element = with("hex32", None, None, Some("0xFFFFFFFF"));
        assert!(element.validate().is_ok());

        let element = with("string", Some("2"), Some("4"), Some("abcde"));
        assert_eq!(element.validate(), Err(ModelError::DefaultOutOfRange));

        let element = with("password", Some("2"), Some("8"), Some("abcde"));
        assert!(element.validate().is_ok());
        assert_eq!(element.default_value().as_deref(), Some("\"abcde\""));
    }

    #[test]
    fn test_max_required_for_writable_strings() {
        let element = typed("string");
        assert_eq!(element.validate(), Err(ModelError::MaxRequired));

        let mut element = element_read_only("multiline_string");
        element.info_mut().inherit_access(AccessType::ReadOnly);
        assert!(element.validate().is_ok());
    }

    fn element_read_only(element_type: &str) -> Element {
        let mut element = typed(element_type);
        element.info_mut().set_access(AccessType::ReadOnly).unwrap();
        element
    }

    #[test]
    fn test_min_max_unsupported() {
        let element = with("boolean", Some("0"), None, None);
        assert_eq!(element.validate().unwrap_err().to_string(), "min is not supported");
        let element = with("ipv4", None, Some("1"), None);
        assert_eq!(element.validate().unwrap_err().to_string(), "max is not supported");
    }

    #[test]
    fn test_missing_type() {
        let element = Element::new(ItemInfo::new("e", Some("E".to_string()), None).unwrap());
        assert_eq!(element.validate(), Err(ModelError::MissingType));
        assert_matches!(
            element.member_type(),
            Err(ModelError::ValueWithoutType { ref element }) if element == "e"
        );
    }

    #[test]
    fn test_float_rules() {
        assert!(with("float", Some("-1.5"), Some("2.5"), Some("0.25")).validate().is_ok());
        assert_eq!(
            with("float", None, None, Some("NaN")).validate(),
            Err(ModelError::ValueInvalid { bound: Bound::Default })
        );
        assert_eq!(
            with("float", Some("3"), Some("1"), None).validate(),
            Err(ModelError::MinAboveMax)
        );
        assert_eq!(
            with("float", Some("0"), Some("1"), Some("1.5")).validate(),
            Err(ModelError::DefaultOutOfRange)
        );
    }

    #[test]
    fn test_enum_values_and_default() {
        let mut element = with("enum", None, None, Some("c"));
        element.add_value(value("a")).unwrap();
        element.add_value(value("b")).unwrap();
        assert_eq!(
            element.validate().unwrap_err().to_string(),
            "default enumeration value not found"
        );
        assert_matches!(
            element.add_value(value("a")),
            Err(ModelError::DuplicateValue { ref name }) if name == "a"
        );

        let mut element = with("enum", None, None, Some("b"));
        element.add_value(value("a")).unwrap();
        element.add_value(value("b")).unwrap();
        assert!(element.validate().is_ok());
        assert_eq!(element.default_value().as_deref(), Some("1"));

        assert_eq!(element_empty_enum().validate(), Err(ModelError::NoEnumValues));
    }

    fn element_empty_enum() -> Element {
        typed("enum")
    }

    #[test]
    fn test_values_rejected_on_other_types() {
        let mut element = typed("uint32");
        assert_eq!(
            element.add_value(value("a")).unwrap_err().to_string(),
            "Invalid <value> for type: uint32"
        );

        let mut element = typed("enum");
        let reference = Reference::new("/g1/l1", None, None).unwrap();
        assert_matches!(
            element.add_ref(reference),
            Err(ModelError::ValueNotAllowed {
                element_type: ElementType::Enum
            })
        );
    }

    #[test]
    fn test_ref_enum_default_may_prefix_reference() {
        let mut element = with("ref_enum", None, None, Some("/g1/l1/eth0"));
        element
            .add_ref(Reference::new("/g1/l1", None, None).unwrap())
            .unwrap();
        assert!(element.validate().is_ok());
        assert_eq!(element.default_value().as_deref(), Some("\"/g1/l1/eth0\""));

        assert_eq!(typed("ref_enum").validate(), Err(ModelError::NoRefEnumValues));
    }

    #[test]
    fn test_literal_defaults() {
        assert_eq!(
            with("on_off", None, None, Some("yes")).validate().unwrap_err().to_string(),
            "Bad default on_off value"
        );
        let element = with("boolean", None, None, Some("true"));
        assert!(element.validate().is_ok());
        assert_eq!(element.default_value().as_deref(), Some("connector_true"));
    }

    #[test]
    fn test_address_defaults() {
        assert!(with("ipv4", None, None, Some("192.168.1.1")).validate().is_ok());
        assert_eq!(
            with("ipv4", None, None, Some("256.1.1.1")).validate(),
            Err(ModelError::InvalidIpv4)
        );
        assert!(with("fqdnv4", None, Some("64"), Some("device.example.com"))
            .validate()
            .is_ok());
        assert!(with("fqdnv4", None, Some("64"), Some("Device.Example.com"))
            .validate()
            .is_ok());
        assert!(with("fqdnv6", None, Some("64"), Some("http://Gateway-1.LAN:8080"))
            .validate()
            .is_ok());
        assert_eq!(
            with("fqdnv6", None, Some("64"), Some("bad host!")).validate(),
            Err(ModelError::InvalidFqdn)
        );
        assert_eq!(
            with("mac_addr", None, None, Some("00:11")).validate().unwrap_err().to_string(),
            "Default value is unsupported for mac_addr"
        );
        assert_eq!(
            with("list", None, None, Some("x")).validate(),
            Err(ModelError::ListDefault)
        );
    }

    #[test]
    fn test_regex_requires_pattern_and_syntax() {
        let mut element = with("string", None, Some("32"), None);
        element.set_pattern("^[a-z]+$").unwrap();
        assert_eq!(element.validate(), Err(ModelError::IncompleteRegex));
        element.set_syntax("posix".to_string());
        assert!(element.validate().is_ok());

        assert_matches!(
            element.set_pattern("(unclosed"),
            Err(ModelError::InvalidPattern { .. })
        );
    }

    #[test]
    fn test_resolved_range_annotation() {
        let mut element = typed("ref_enum");
        element.set_resolved_range(3, 17);
        assert_eq!((element.min(), element.max()), (Some("3"), Some("17")));
    }
}
