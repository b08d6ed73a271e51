//! Resolution of `ref_enum` reference paths into the setting table

use super::error::{ValidationError, ValidationResult};
use crate::model::{Element, Item, ItemList, Location, ParseSession, TableType};

/// Length range computed for one `ref_enum` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEnumRange {
    pub location: Location,
    pub min: usize,
    pub max: usize,
}

/// Whether the segments after a group name lead to a dictionary.
///
/// Segments alternate between an instance and a child list name, so a path
/// must end right after a list name. Array instances are range-checked;
/// dictionary keys are taken as given.
fn leads_to_dictionary(list: &ItemList, remaining: &[&str]) -> bool {
    match remaining {
        [] => list.is_dictionary(),
        [_] => false,
        [instance, next, rest @ ..] => {
            if list.is_array() {
                let in_range = instance
                    .parse::<u32>()
                    .is_ok_and(|i| i >= 1 && list.instances().is_some_and(|n| i <= n));
                if !in_range {
                    return false;
                }
            }

            list.find(next)
                .and_then(Item::as_list)
                .is_some_and(|child| leads_to_dictionary(child, rest))
        }
    }
}

/// Whether an absolute reference path resolves in the setting table
pub fn reference_resolves(session: &ParseSession, path: &str) -> bool {
    let relative = path.strip_prefix('/').unwrap_or(path);
    let segments: Vec<&str> = relative.split('/').collect();
    let Some((top, remaining)) = segments.split_first() else {
        return false;
    };

    session
        .table(TableType::Setting)
        .group(top)
        .is_some_and(|group| leads_to_dictionary(group.list(), remaining))
}

fn range_of(session: &ParseSession, element: &Element) -> ValidationResult<(usize, usize)> {
    let key_length = session.limits().max_dynamic_key_length;

    let value_lengths = element.values().iter().map(|v| v.name().chars().count());

    let mut ref_lengths = Vec::with_capacity(element.refs().len());
    for reference in element.refs() {
        if !reference_resolves(session, reference.path()) {
            return Err(ValidationError::InvalidReference {
                reference: reference.path().to_string(),
            });
        }
        ref_lengths.push(reference.path().chars().count() + key_length);
    }

    let lengths: Vec<usize> = value_lengths.chain(ref_lengths).collect();
    let min = lengths.iter().copied().min().unwrap_or(0);
    let max = lengths.iter().copied().max().unwrap_or(0);
    Ok((min, max))
}

/// Compute the range of every registered `ref_enum` without modifying the tree
pub fn compute_ranges(session: &ParseSession) -> ValidationResult<Vec<RefEnumRange>> {
    session
        .ref_enums()
        .iter()
        .map(|location| {
            let element = session
                .table(location.table())
                .resolve(location.path())
                .and_then(|resolved| resolved.as_element())
                .ok_or_else(|| ValidationError::MissingRefEnum {
                    location: location.clone(),
                })?;

            let (min, max) = range_of(session, element)?;
            Ok(RefEnumRange {
                location: location.clone(),
                min,
                max,
            })
        })
        .collect()
}

/// Store computed ranges on their elements
pub fn apply_ranges(session: &mut ParseSession, ranges: &[RefEnumRange]) -> ValidationResult<()> {
    for range in ranges {
        if !session.annotate_ref_enum_range(&range.location, range.min, range.max) {
            return Err(ValidationError::MissingRefEnum {
                location: range.location.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::lexical::TokenScanner;
    use crate::syntax::parse_source;
    use assert_matches::assert_matches;

    const NETWORK: &str = "group setting net 2 \"Net\"\n list ifaces \"Interfaces\" keys {}\n  element mtu \"MTU\" type uint32\n end\nend\ngroup setting host \"Host\" keys {}\n element name \"Name\" type string max 32\nend\n";

    fn session(extra: &str) -> ParseSession {
        let source = format!("{}{}", NETWORK, extra);
        let mut scanner = TokenScanner::new(&source).unwrap();
        let mut session =
            ParseSession::new(GeneratorLimits::builtin().with_max_dynamic_key_length(16));
        parse_source(&mut scanner, &mut session).unwrap();
        session
    }

    #[test]
    fn test_reference_paths() {
        let session = session("");
        assert!(reference_resolves(&session, "/net/1/ifaces"));
        assert!(reference_resolves(&session, "/net/2/ifaces"));
        assert!(reference_resolves(&session, "/host"));

        assert!(!reference_resolves(&session, "/net/3/ifaces"));
        assert!(!reference_resolves(&session, "/net/0/ifaces"));
        assert!(!reference_resolves(&session, "/net/*/ifaces"));
        assert!(!reference_resolves(&session, "/net/ifaces"));
        assert!(!reference_resolves(&session, "/net/1/ifaces/eth0"));
        assert!(!reference_resolves(&session, "/net"));
        assert!(!reference_resolves(&session, "/net/1/mtu"));
        assert!(!reference_resolves(&session, "/missing/1/ifaces"));
    }

    #[test]
    fn test_dictionary_instances_are_not_checked() {
        let session = session(
            "group setting vpn \"VPN\" keys {}\n list peers \"Peers\" keys {}\n  element addr \"Addr\" type ipv4\n end\nend\n",
        );
        assert!(reference_resolves(&session, "/vpn/anything/peers"));
    }

    #[test]
    fn test_ranges_are_computed_then_applied() {
        let mut session = session(
            "group setting sel \"Select\"\n element iface \"Iface\" type ref_enum\n  value none \"None\"\n  ref /net/1/ifaces \"Interface\"\n",
        );

        let ranges = compute_ranges(&session).unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].min, 4);
        assert_eq!(ranges[0].max, 13 + 16);

        apply_ranges(&mut session, &ranges).unwrap();
        let element = session
            .table(TableType::Setting)
            .resolve(ranges[0].location.path())
            .and_then(|r| r.as_element())
            .unwrap();
        assert_eq!(element.min(), Some("4"));
        assert_eq!(element.max(), Some("29"));
    }

    #[test]
    fn test_invalid_reference() {
        let session = session(
            "group setting sel \"Select\"\n element iface \"Iface\" type ref_enum\n  ref /net/ifaces\n",
        );
        assert_matches!(
            compute_ranges(&session),
            Err(ValidationError::InvalidReference { reference }) if reference == "/net/ifaces"
        );
    }
}
