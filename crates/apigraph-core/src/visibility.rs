//! Public-API visibility rule.

use apigraph_error::{Error, Result};

/// Returns true iff `name` starts with an ASCII uppercase letter.
///
/// This is the only visibility rule apigraph knows about. An empty name is a
/// broken input, not an unexported symbol.
pub fn is_exported(name: &str) -> Result<bool> {
    let Some(first) = name.bytes().next() else {
        return Err(Error::contract_violation("symbol name is empty")
            .with_operation("visibility::is_exported"));
    };
    Ok(first.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigraph_error::ErrorKind;

    #[test]
    fn test_uppercase_is_exported() {
        assert!(is_exported("Foo").unwrap());
        assert!(is_exported("A").unwrap());
        assert!(is_exported("ZZ_top").unwrap());
    }

    #[test]
    fn test_lowercase_and_symbols_are_not_exported() {
        assert!(!is_exported("foo").unwrap());
        assert!(!is_exported("_Foo").unwrap());
        assert!(!is_exported("9Lives").unwrap());
        assert!(!is_exported("init#1").unwrap());
    }

    #[test]
    fn test_non_latin_uppercase_is_not_exported() {
        assert!(!is_exported("Ärger").unwrap());
        assert!(!is_exported("Ωmega").unwrap());
    }

    #[test]
    fn test_empty_name_is_a_contract_violation() {
        let err = is_exported("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert_eq!(err.operation(), "visibility::is_exported");
    }
}
