//! Declaration parsing implementation
//!
//! This module handles parsing of the declaration layer of a program:
//!
//! - Class definitions: `[public] class Name { methods }`
//! - Method definitions: `[public] [static] type name(params) { ... }`
//! - Type parsing: base types and a single array dimension
//! - Method parameters
//!
//! # Grammar
//!
//! ```text
//! program      ::= class_decl*
//! class_decl   ::= "public"? "class" identifier "{" method_decl* "}"
//! method_decl  ::= modifier* type identifier "(" params? ")" block
//! params       ::= type identifier ("," type identifier)*
//! type         ::= ("int" | "double" | "boolean" | "String" | "void") ("[" "]")?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a class definition: [public] class Name { methods }
    pub(crate) fn parse_class_declaration(&mut self) -> Result<ClassDecl, ParseError> {
        // The printer always emits `public class`, so the modifier is not stored
        self.match_token(TokenKind::Public);

        self.expect_token(TokenKind::Class, "to start a class declaration")?;
        let loc = self.previous_location();
        let name = self.expect_identifier("after 'class'")?;

        self.expect_lbrace("after class name")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            methods.push(self.parse_method_declaration()?);
        }

        self.expect_rbrace("after class body")?;

        Ok(ClassDecl {
            name,
            methods,
            location: loc,
        })
    }

    /// Parse method definition: modifiers type name(params) { body }
    pub(crate) fn parse_method_declaration(&mut self) -> Result<MethodDecl, ParseError> {
        let modifiers = self.parse_modifiers()?;
        let return_type = self.parse_type(true)?;
        let name = self.expect_identifier("for method name")?;
        let loc = self.previous_location();

        self.expect_lparen("after method name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        self.current_return = Some(return_type);
        let body = self.parse_block("before method body", "after method body");
        self.current_return = None;

        Ok(MethodDecl {
            name,
            modifiers,
            return_type,
            params,
            body: body?,
            location: loc,
        })
    }

    /// Parse `public` / `static` in any order, each at most once
    fn parse_modifiers(&mut self) -> Result<Modifiers, ParseError> {
        let mut modifiers = Modifiers::default();

        loop {
            let seen = if self.check(TokenKind::Public) {
                std::mem::replace(&mut modifiers.is_public, true)
            } else if self.check(TokenKind::Static) {
                std::mem::replace(&mut modifiers.is_static, true)
            } else {
                break;
            };

            if seen {
                return Err(self.error_here("each modifier at most once"));
            }
            self.advance();
        }

        Ok(modifiers)
    }

    /// Parse parameter list: type name, type name, ...
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let param_type = self.parse_type(false)?;
            let name = self.expect_identifier("for parameter name")?;
            params.push(Param { name, param_type });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse type: base_type [ "[" "]" ]
    ///
    /// `void` is only accepted when `allow_void` is set (method return types)
    /// and never as an array element type.
    pub(crate) fn parse_type(&mut self, allow_void: bool) -> Result<Type, ParseError> {
        let base = match self.parse_base_type() {
            Some(BaseType::Void) if !allow_void => {
                return Err(ParseError {
                    expected: "a non-void type".to_string(),
                    found: self.previous().to_string(),
                    location: self.previous_location(),
                });
            }
            Some(base) => base,
            None => return Err(self.error_here("type")),
        };

        let mut ty = Type::new(base);
        if self.match_token(TokenKind::LBracket) {
            if base == BaseType::Void {
                return Err(ParseError {
                    expected: "a non-void array element type".to_string(),
                    found: "'['".to_string(),
                    location: self.previous_location(),
                });
            }
            self.expect_token(TokenKind::RBracket, "in array type")?;
            ty = ty.with_array();
        }

        Ok(ty)
    }

    /// Consume a base type keyword if one is next
    pub(crate) fn parse_base_type(&mut self) -> Option<BaseType> {
        let base = match self.peek_kind() {
            TokenKind::Int => BaseType::Int,
            TokenKind::Double => BaseType::Double,
            TokenKind::Boolean => BaseType::Boolean,
            TokenKind::StringType => BaseType::String,
            TokenKind::Void => BaseType::Void,
            _ => return None,
        };
        self.advance();
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{ParseError, Parser};

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        Parser::from_source(source)
            .expect("lexing failed")
            .parse_program()
    }

    #[test]
    fn test_method_signature() {
        let program = parse_source(
            "class A { public static double dividir(double a, int[] b) { return a; } }",
        )
        .unwrap();
        let method = &program.classes[0].methods[0];

        assert_eq!(method.name, "dividir");
        assert_eq!(
            method.modifiers,
            Modifiers {
                is_public: true,
                is_static: true
            }
        );
        assert_eq!(method.return_type, Type::new(BaseType::Double));
        assert_eq!(method.params.len(), 2);
        assert_eq!(method.params[0].name, "a");
        assert_eq!(method.params[1].param_type, Type::new(BaseType::Int).with_array());
    }

    #[test]
    fn test_modifier_order_is_free() {
        let program = parse_source("class A { static public void f() { } }").unwrap();
        let modifiers = program.classes[0].methods[0].modifiers;
        assert!(modifiers.is_public && modifiers.is_static);
    }

    #[test]
    fn test_duplicate_modifier_rejected() {
        let err = parse_source("class A { static static void f() { } }").unwrap_err();
        assert_eq!(err.expected, "each modifier at most once");
    }

    #[test]
    fn test_main_signature() {
        let program =
            parse_source("public class M { public static void main(String[] args) { } }").unwrap();
        let param = &program.classes[0].methods[0].params[0];
        assert_eq!(param.param_type, Type::new(BaseType::String).with_array());
        assert_eq!(param.name, "args");
    }

    #[test]
    fn test_array_return_type() {
        let program = parse_source("class A { int[] f() { return new int[3]; } }").unwrap();
        assert!(program.classes[0].methods[0].return_type.is_array);
    }

    #[test]
    fn test_void_parameter_rejected() {
        let err = parse_source("class A { void f(void x) { } }").unwrap_err();
        assert_eq!(err.expected, "a non-void type");
    }

    #[test]
    fn test_void_array_rejected() {
        assert!(parse_source("class A { void[] f() { } }").is_err());
    }

    #[test]
    fn test_two_dimensional_array_rejected() {
        let err = parse_source("class A { void f(int[][] m) { } }").unwrap_err();
        assert_eq!(err.found, "'['");
    }

    #[test]
    fn test_missing_class_keyword() {
        let err = parse_source("public A { }").unwrap_err();
        assert_eq!(err.expected, "'class' to start a class declaration");
        assert_eq!(err.found, "identifier 'A'");
    }

    #[test]
    fn test_unclosed_class() {
        let err = parse_source("class A {\n void f() { }\n").unwrap_err();
        assert_eq!(err.expected, "'}' after class body");
        assert_eq!(err.found, "end of file");
    }
}
