//! Recursive-descent parser for RCI configuration statements
//!
//! Each statement starts with a keyword. Bodies run until a token that is
//! not one of their keywords; groups and elements hand that token back to
//! their caller, lists require `end`. Nodes validate themselves as they are
//! closed, so everything stored in the session is locally consistent.

use super::error::{AtLine, Construct, DescriptionKind, ParseError, ParseErrorKind, ParseResult};
use super::expression::next_expression;
use crate::config::compile_time::syntax::{MAX_DESCRIPTION_LENGTH, MAX_LIST_DEPTH};
use crate::lexical::{Token, TokenScanner};
use crate::logging::codes;
use crate::model::{
    AccessType, Capacity, Condition, Element, ElementType, EnumValue, Group, ItemCategory,
    ItemInfo, ItemList, Location, Operation, ParseSession, Predicate, Reference, RegexCase,
    TableType,
};
use crate::{log_debug, log_success};

fn keyword(token: &Token<'_>) -> String {
    token.text.to_ascii_lowercase()
}

fn is_comment(token: &Token<'_>) -> bool {
    token.text.starts_with('#')
}

fn is_name_start(c: char) -> bool {
    c == ':' || c == '_' || c.is_ascii_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '.' || c == '-'
}

/// `[:A-Z_a-z][:A-Z_a-z0-9.-]*`, with a leading digit allowed for value names
fn is_valid_name(name: &str, leading_digit: bool) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start(c) || (leading_digit && c.is_ascii_digit()) => {
            chars.all(is_name_char)
        }
        _ => false,
    }
}

fn is_latin1(text: &str) -> bool {
    text.chars().all(|c| u32::from(c) <= 0xFF)
}

pub struct Parser<'p, 'src> {
    scanner: &'p mut TokenScanner<'src>,
    session: &'p mut ParseSession,
}

impl<'p, 'src> Parser<'p, 'src> {
    pub fn new(scanner: &'p mut TokenScanner<'src>, session: &'p mut ParseSession) -> Self {
        Self { scanner, session }
    }

    fn line(&self) -> usize {
        self.scanner.line_number()
    }

    /// Parse top-level statements until the input is exhausted
    pub fn parse(&mut self) -> ParseResult<()> {
        while let Some(token) = self.scanner.next_token() {
            match keyword(&token).as_str() {
                "globalerror" => {
                    let name = self.name()?;
                    let description = self.quoted(DescriptionKind::Error)?;
                    self.session
                        .global_errors_mut()
                        .add_user_error(&name, description)
                        .at_line(self.line())?;
                }
                "condition" => self.condition()?,
                "group" => self.group()?,
                _ if is_comment(&token) => self.scanner.skip_comment_line(),
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnrecognizedKeyword {
                            keyword: token.text.to_string(),
                        },
                        self.line(),
                    ))
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // token readers
    // ------------------------------------------------------------------

    /// Identifier for a group, list, element, condition or error
    fn name(&mut self) -> ParseResult<String> {
        let line = self.line();
        let name = self
            .scanner
            .next_token()
            .ok_or(ParseError::new(ParseErrorKind::MissingName, line))?
            .text;

        let max = self.session.limits().max_name_length;
        if name.chars().count() > max {
            return Err(ParseError::new(ParseErrorKind::NameTooLong { max }, self.line()));
        }
        if !is_valid_name(name, false) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidName {
                    name: name.to_string(),
                },
                self.line(),
            ));
        }
        Ok(name.to_string())
    }

    /// A quoted string, or a plain token when the next one is unquoted
    fn string(&mut self) -> Option<&'src str> {
        if self.scanner.peek_starts_with('"') {
            self.scanner.next_quoted()
        } else {
            self.scanner.next_token().map(|t| t.text)
        }
    }

    fn required_string(&mut self, missing: ParseErrorKind) -> ParseResult<String> {
        match self.string() {
            Some(text) => Ok(text.to_string()),
            None => Err(ParseError::new(missing, self.line())),
        }
    }

    /// Optional quoted description; empty text counts as absent
    fn quoted(&mut self, kind: DescriptionKind) -> ParseResult<Option<String>> {
        if !self.scanner.peek_starts_with('"') {
            return Ok(None);
        }

        let text = match self.scanner.next_quoted() {
            Some(text) => text,
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidDescription { kind },
                    self.line(),
                ))
            }
        };
        if !is_latin1(text) {
            return Err(ParseError::new(ParseErrorKind::NonLatin1 { kind }, self.line()));
        }

        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    /// Label description, length-checked with `:` escaped
    fn label(&mut self) -> ParseResult<Option<String>> {
        let Some(description) = self.quoted(DescriptionKind::Label)? else {
            return Ok(None);
        };
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ParseError::new(
                ParseErrorKind::DescriptionTooLong {
                    max: MAX_DESCRIPTION_LENGTH,
                },
                self.line(),
            ));
        }
        Ok(Some(description.replace(':', "::")))
    }

    fn help(&mut self) -> ParseResult<Option<String>> {
        self.quoted(DescriptionKind::Help)
    }

    /// Optional integer or parenthesized count after a collection name
    fn instances(&mut self) -> ParseResult<Option<i32>> {
        if self.scanner.peek_int().is_some() {
            return self.scanner.next_int().map(Some).at_line(self.line());
        }
        if self.scanner.peek_starts_with('(') {
            return next_expression(self.scanner).map(Some).at_line(self.line());
        }
        Ok(None)
    }

    fn access(&mut self) -> ParseResult<AccessType> {
        let line = self.line();
        let text = self
            .scanner
            .next_token()
            .ok_or(ParseError::new(ParseErrorKind::Missing { what: "access" }, line))?
            .text;
        AccessType::parse(text).at_line(self.line())
    }

    fn min_max(&mut self) -> ParseResult<String> {
        if self.scanner.peek_starts_with('(') {
            return next_expression(self.scanner)
                .map(|value| value.to_string())
                .at_line(self.line());
        }
        match self.scanner.next_token() {
            Some(token) => Ok(token.text.to_string()),
            None => Err(ParseError::new(
                ParseErrorKind::Missing {
                    what: "min or max value",
                },
                self.line(),
            )),
        }
    }

    fn regex_case(&mut self) -> ParseResult<RegexCase> {
        let value = self
            .required_string(ParseErrorKind::Missing { what: "case value" })?
            .to_ascii_lowercase();
        match value.as_str() {
            "ignore" | "match" => RegexCase::parse(&value).at_line(self.line()),
            _ => Err(ParseError::new(ParseErrorKind::InvalidCase, self.line())),
        }
    }

    fn capacity(&mut self, construct: Construct, line: usize) -> ParseResult<Capacity> {
        let value = self.scanner.next_token().map(|t| t.text).unwrap_or_default();
        Capacity::parse(value).ok_or_else(|| {
            ParseError::within(
                construct,
                line,
                ParseErrorKind::InvalidCapacity {
                    construct,
                    value: value.to_string(),
                },
            )
        })
    }

    /// Only the empty key set is supported
    fn keys(&mut self, construct: Construct, line: usize) -> ParseResult<Vec<String>> {
        match self.scanner.next_token() {
            Some(token) if token.text == "{}" => Ok(Vec::new()),
            _ => Err(ParseError::within(
                construct,
                line,
                ParseErrorKind::KeysUnimplemented { construct },
            )),
        }
    }

    /// Name of an `enum` member
    fn value_name(&mut self) -> ParseResult<String> {
        let line = self.line();
        let name = self
            .scanner
            .next_token()
            .ok_or(ParseError::new(ParseErrorKind::MissingName, line))?
            .text;

        let max = self.session.limits().max_name_length;
        if name.chars().count() > max {
            return Err(ParseError::new(
                ParseErrorKind::ValueNameTooLong { max },
                self.line(),
            ));
        }
        if !is_valid_name(name, true) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidValueName {
                    name: name.to_string(),
                },
                self.line(),
            ));
        }
        Ok(name.to_string())
    }

    /// Absolute `ref` path such as `/network/*/interfaces`
    fn ref_path(&mut self) -> ParseResult<String> {
        let path = self.required_string(ParseErrorKind::MissingName)?;

        let Some(relative) = path.strip_prefix('/') else {
            return Err(ParseError::new(
                ParseErrorKind::RefPathNotRooted { path },
                self.line(),
            ));
        };
        if path.ends_with('/') {
            return Err(ParseError::new(
                ParseErrorKind::RefPathTrailingSlash { path },
                self.line(),
            ));
        }
        if let Some(segment) = relative
            .split('/')
            .find(|segment| *segment != "*" && !is_valid_name(segment, true))
        {
            return Err(ParseError::new(
                ParseErrorKind::InvalidRefPathSegment {
                    segment: segment.to_string(),
                },
                self.line(),
            ));
        }
        Ok(path)
    }

    // ------------------------------------------------------------------
    // statements
    // ------------------------------------------------------------------

    /// `condition NAME source PATH [operation equals|regex] [pattern P] [case C] [value V]`
    fn condition(&mut self) -> ParseResult<()> {
        let line = self.line();
        let name = self.name()?;

        let mut source = None;
        let mut operation = Operation::default();
        let mut pattern = None;
        let mut case = RegexCase::default();
        let mut value = None;

        while let Some(token) = self.scanner.next_token() {
            match keyword(&token).as_str() {
                "source" => source = self.string(),
                "operation" => {
                    let text = self.string().unwrap_or_default();
                    operation = Operation::parse(text).at_line(self.line())?;
                }
                "pattern" => pattern = self.string(),
                "case" => {
                    let text = self.string().unwrap_or_default();
                    case = RegexCase::parse(text).at_line(self.line())?;
                }
                "value" => value = self.string(),
                _ if is_comment(&token) => self.scanner.skip_comment_line(),
                _ => {
                    self.scanner.push_back(token).at_line(self.line())?;
                    break;
                }
            }
        }

        let missing = |what| {
            ParseError::within(
                Construct::Condition,
                line,
                ParseErrorKind::MissingConditionPart { what },
            )
        };

        let source = source.ok_or_else(|| missing("source"))?;
        let location = Location::parse(source).at_line(self.line())?;
        let predicate = match operation {
            Operation::Equals => Predicate::Equals {
                value: value.ok_or_else(|| missing("value"))?.to_string(),
            },
            Operation::Regex => Predicate::Regex {
                pattern: pattern.ok_or_else(|| missing("pattern"))?.to_string(),
                case,
            },
        };

        let table = location.table();
        self.session
            .table_mut(table)
            .add_condition(Condition::new(name.as_str(), location, predicate))
            .at_line(self.line())?;

        log_success!(codes::success::CONDITION_REGISTERED, "Condition registered",
            "condition" => name,
            "table" => table,
            "line" => line
        );
        Ok(())
    }

    /// Attach a condition declared earlier in the same table
    fn attach_condition(&mut self, info: &mut ItemInfo, current: &Location) -> ParseResult<()> {
        let name = self.name()?;
        let line = self.line();
        let condition = self
            .session
            .table(current.table())
            .condition(&name)
            .at_line(line)?;
        info.attach_condition(condition, current).at_line(line)
    }

    /// `group setting|state NAME [count] "desc" ["help"]` followed by its body
    fn group(&mut self) -> ParseResult<()> {
        let line = self.line();
        let table_text = self.scanner.next_token().map(|t| t.text).unwrap_or_default();
        let table_type = TableType::parse(table_text).at_line(line)?;
        let name = self.name()?;
        let current = Location::root(table_type).descend(&name);

        let instances = self.instances()?;
        let description = self.label()?;
        let help = self.help()?;
        let mut group = Group::new(ItemInfo::new(name.as_str(), description, help).at_line(self.line())?);
        self.session
            .statistics_mut()
            .record_name_length(ItemCategory::Collections, name.chars().count());

        if let Some(count) = instances {
            group.list_mut().set_instances(count).at_line(self.line())?;
        }

        let default_access = table_type.default_access();
        while let Some(token) = self.scanner.next_token() {
            match keyword(&token).as_str() {
                "capacity" => {
                    let capacity = self.capacity(Construct::Group, line)?;
                    group.list_mut().set_capacity(capacity);
                }
                "keys" => {
                    let keys = self.keys(Construct::Group, line)?;
                    group.list_mut().set_keys(keys);
                }
                "condition" => self.attach_condition(group.list_mut().info_mut(), &current)?,
                "element" => {
                    let element = self.element(default_access, &current)?;
                    group.list_mut().add_item(element).at_line(self.line())?;
                }
                "list" => {
                    let list = self.list(default_access, &current, 0)?;
                    group.list_mut().add_item(list).at_line(self.line())?;
                }
                "error" => {
                    let error = self.name()?;
                    let description = self.quoted(DescriptionKind::Error)?;
                    group.add_error(&error, description).at_line(self.line())?;
                }
                "end" => break,
                _ if is_comment(&token) => self.scanner.skip_comment_line(),
                _ => {
                    self.scanner.push_back(token).at_line(self.line())?;
                    break;
                }
            }
        }

        group
            .list_mut()
            .validate(self.session.limits())
            .map_err(|e| ParseError::of(Construct::Group, name.as_str(), line, e))?;
        self.session
            .statistics_mut()
            .record_collection(group.list(), true);

        let items = group.list().items().len();
        self.session
            .table_mut(table_type)
            .add_group(group)
            .at_line(self.line())?;

        log_success!(codes::success::GROUP_REGISTERED, "Group registered",
            "group" => name,
            "table" => table_type,
            "items" => items,
            "line" => line
        );
        Ok(())
    }

    /// `element NAME "desc" ["help"]` followed by element keywords
    fn element(&mut self, default_access: AccessType, parent: &Location) -> ParseResult<Element> {
        let line = self.line();
        let name = self.name()?;
        let current = parent.descend(&name);

        let description = self.label()?;
        let help = self.help()?;
        let mut element = Element::new(ItemInfo::new(name.as_str(), description, help).at_line(self.line())?);
        self.session
            .statistics_mut()
            .record_name_length(ItemCategory::Elements, name.chars().count());

        while let Some(token) = self.scanner.next_token() {
            match keyword(&token).as_str() {
                "type" => {
                    let text = self
                        .scanner
                        .next_token()
                        .map(|t| t.text)
                        .ok_or(ParseError::new(ParseErrorKind::Missing { what: "type" }, line))?;
                    let element_type = element.set_type(text).at_line(self.line())?;
                    self.session.statistics_mut().record_type(element_type);
                }
                "access" => {
                    let access = self.access()?;
                    element.info_mut().set_access(access).at_line(self.line())?;
                }
                "min" => {
                    let min = self.min_max()?;
                    element.set_min(min).at_line(self.line())?;
                }
                "max" => {
                    let max = self.min_max()?;
                    element.set_max(max).at_line(self.line())?;
                }
                "default" => {
                    let default = self.required_string(ParseErrorKind::Missing { what: "default" })?;
                    element.set_default(default).at_line(self.line())?;
                }
                "units" => {
                    let units = self.required_string(ParseErrorKind::MissingOrBad { what: "units" })?;
                    element.set_units(units).at_line(self.line())?;
                }
                "pattern" => {
                    let pattern = self.required_string(ParseErrorKind::MissingOrBad {
                        what: "regex pattern",
                    })?;
                    element.set_pattern(&pattern).at_line(self.line())?;
                }
                "case" => {
                    let case = self.regex_case()?;
                    element.set_regex_case(case);
                }
                "syntax" => {
                    let syntax = self.required_string(ParseErrorKind::MissingOrBad {
                        what: "regex syntax",
                    })?;
                    element.set_syntax(syntax);
                }
                "value" => self.enum_value(&mut element)?,
                "ref" => self.reference(&mut element)?,
                "condition" => self.attach_condition(element.info_mut(), &current)?,
                _ if is_comment(&token) => self.scanner.skip_comment_line(),
                _ => {
                    self.scanner.push_back(token).at_line(self.line())?;
                    break;
                }
            }
        }

        element.info_mut().inherit_access(default_access);
        element
            .validate()
            .map_err(|e| ParseError::of(Construct::Element, name.as_str(), line, e))?;

        if element.element_type() == Some(ElementType::RefEnum) {
            self.session.register_ref_enum(current);
        }

        log_debug!("Element parsed",
            "element" => name,
            "type" => element.element_type().map(|t| t.as_str()).unwrap_or_default(),
            "line" => line
        );
        Ok(element)
    }

    /// `value NAME ["desc" ["help"]]`
    fn enum_value(&mut self, element: &mut Element) -> ParseResult<()> {
        let name = match element.member_type().at_line(self.line())? {
            ElementType::Enum => self.value_name()?,
            _ => self.required_string(ParseErrorKind::MissingName)?,
        };
        self.session
            .statistics_mut()
            .record_name_length(ItemCategory::Values, name.chars().count());

        let description = self.label()?;
        let help = self.help()?;
        let value = EnumValue::new(&name, description, help).at_line(self.line())?;
        element.add_value(value).at_line(self.line())
    }

    /// `ref PATH ["desc" ["help"]]`
    fn reference(&mut self, element: &mut Element) -> ParseResult<()> {
        let path = self.ref_path()?;
        self.session
            .statistics_mut()
            .record_name_length(ItemCategory::Values, path.chars().count());

        let description = self.label()?;
        let help = self.help()?;
        let reference = Reference::new(&path, description, help).at_line(self.line())?;
        element.add_ref(reference).at_line(self.line())
    }

    /// `list NAME [count] "desc" ["help"]` followed by its body and `end`
    fn list(
        &mut self,
        default_access: AccessType,
        parent: &Location,
        depth: usize,
    ) -> ParseResult<ItemList> {
        let line = self.line();
        let name = self.name()?;
        let current = parent.descend(&name);
        let instances = self.instances()?;

        let depth = depth + 1;
        if depth > MAX_LIST_DEPTH {
            return Err(ParseError::of(
                Construct::List,
                name.as_str(),
                line,
                ParseErrorKind::ListTooDeep {
                    max: MAX_LIST_DEPTH,
                },
            ));
        }
        self.session.statistics_mut().record_list_depth(depth);

        let description = self.label()?;
        let help = self.help()?;
        let mut list = ItemList::new(ItemInfo::new(name.as_str(), description, help).at_line(self.line())?);
        self.session
            .statistics_mut()
            .record_name_length(ItemCategory::Collections, name.chars().count());

        if let Some(count) = instances {
            list.set_instances(count).at_line(self.line())?;
        }

        let mut list_access = default_access;
        while let Some(token) = self.scanner.next_token() {
            match keyword(&token).as_str() {
                "capacity" => {
                    let capacity = self.capacity(Construct::List, line)?;
                    list.set_capacity(capacity);
                }
                "keys" => {
                    let keys = self.keys(Construct::List, line)?;
                    list.set_keys(keys);
                }
                "access" => {
                    list_access = self.access()?;
                    list.info_mut().set_access(list_access).at_line(self.line())?;
                }
                "element" => {
                    let element = self.element(list_access, &current)?;
                    list.add_item(element).at_line(self.line())?;
                }
                "list" => {
                    let nested = self.list(list_access, &current, depth)?;
                    list.add_item(nested).at_line(self.line())?;
                }
                "condition" => self.attach_condition(list.info_mut(), &current)?,
                "end" => break,
                _ if is_comment(&token) => self.scanner.skip_comment_line(),
                _ => {
                    return Err(ParseError::within(
                        Construct::List,
                        line,
                        ParseErrorKind::UnknownListToken {
                            token: token.text.to_string(),
                        },
                    ))
                }
            }
        }

        list.info_mut().inherit_access(list_access);
        list.validate(self.session.limits())
            .map_err(|e| ParseError::of(Construct::List, name.as_str(), line, e))?;

        let statistics = self.session.statistics_mut();
        statistics.record_collection(&list, false);
        statistics.record_type(ElementType::List);
        Ok(list)
    }
}
