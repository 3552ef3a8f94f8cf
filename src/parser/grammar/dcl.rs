// Правила управления доступом: роли, пользователи, GRANT / REVOKE, LIST

use crate::parser::ast::*;
use crate::parser::diagnostics::ParseResult;
use crate::parser::keywords::Keyword;
use crate::parser::parser::CqlParser;
use crate::parser::semantic;
use crate::parser::token::TokenType;

/// Права, которые записываются одним ключевым словом
const PERMISSIONS: [(Keyword, Permission); 8] = [
    (Keyword::Alter, Permission::Alter),
    (Keyword::Authorize, Permission::Authorize),
    (Keyword::Create, Permission::Create),
    (Keyword::Describe, Permission::Describe),
    (Keyword::Drop, Permission::Drop),
    (Keyword::Execute, Permission::Execute),
    (Keyword::Modify, Permission::Modify),
    (Keyword::Select, Permission::Select),
];

impl CqlParser {
    // === Роли ===

    /// CREATE ROLE [IF NOT EXISTS] name [WITH options]
    pub(crate) fn parse_create_role(&mut self) -> ParseResult<CreateRoleStatement> {
        self.expect_keyword(Keyword::Role)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_role_name()?;
        let options = if self.eat_keyword(Keyword::With) {
            self.parse_role_options()?
        } else {
            Vec::new()
        };

        Ok(CreateRoleStatement {
            if_not_exists,
            name,
            options,
        })
    }

    /// ALTER ROLE name WITH options
    pub(crate) fn parse_alter_role(&mut self) -> ParseResult<AlterRoleStatement> {
        self.expect_keyword(Keyword::Role)?;
        let name = self.parse_role_name()?;
        self.expect_keyword(Keyword::With)?;
        let options = self.parse_role_options()?;
        Ok(AlterRoleStatement { name, options })
    }

    /// DROP ROLE [IF EXISTS] name
    pub(crate) fn parse_drop_role(&mut self) -> ParseResult<DropRoleStatement> {
        self.expect_keyword(Keyword::Role)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_role_name()?;
        Ok(DropRoleStatement { if_exists, name })
    }

    /// `PASSWORD = '...' AND LOGIN = true AND SUPERUSER = false AND OPTIONS = {...}`
    fn parse_role_options(&mut self) -> ParseResult<Vec<RoleOption>> {
        let mut options = Vec::new();
        loop {
            let token = self.current().clone();
            let option = if self.eat_keyword(Keyword::Password) {
                self.expect(TokenType::Equal)?;
                RoleOption::Password(self.parse_string()?)
            } else if self.eat_keyword(Keyword::Login) {
                self.expect(TokenType::Equal)?;
                RoleOption::Login(self.parse_boolean()?)
            } else if self.eat_keyword(Keyword::Superuser) {
                self.expect(TokenType::Equal)?;
                RoleOption::Superuser(self.parse_boolean()?)
            } else if self.eat_keyword(Keyword::Options) {
                self.expect(TokenType::Equal)?;
                self.expect(TokenType::LeftBrace)?;
                RoleOption::Options(self.parse_option_map()?)
            } else {
                return Err(self.error_here());
            };

            self.validate(&token, semantic::check_role_options(&options, &option))?;
            options.push(option);
            if !self.eat_keyword(Keyword::And) {
                break;
            }
        }
        Ok(options)
    }

    fn parse_boolean(&mut self) -> ParseResult<bool> {
        if self.check(TokenType::BooleanLiteral) {
            let token = self.advance();
            return Ok(token.value.eq_ignore_ascii_case("true"));
        }
        Err(self.error_here())
    }

    // === Пользователи ===

    /// CREATE USER [IF NOT EXISTS] name [WITH PASSWORD '...'] [SUPERUSER | NOSUPERUSER]
    pub(crate) fn parse_create_user(&mut self) -> ParseResult<CreateUserStatement> {
        self.expect_keyword(Keyword::User)?;
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.parse_role_name()?;
        let (password, superuser) = self.parse_user_options()?;

        Ok(CreateUserStatement {
            if_not_exists,
            name,
            password,
            superuser,
        })
    }

    /// ALTER USER name [WITH PASSWORD '...'] [SUPERUSER | NOSUPERUSER]
    pub(crate) fn parse_alter_user(&mut self) -> ParseResult<AlterUserStatement> {
        self.expect_keyword(Keyword::User)?;
        let name = self.parse_role_name()?;
        let (password, superuser) = self.parse_user_options()?;
        Ok(AlterUserStatement {
            name,
            password,
            superuser,
        })
    }

    /// DROP USER [IF EXISTS] name
    pub(crate) fn parse_drop_user(&mut self) -> ParseResult<DropUserStatement> {
        self.expect_keyword(Keyword::User)?;
        let if_exists = self.parse_if_exists()?;
        let name = self.parse_role_name()?;
        Ok(DropUserStatement { if_exists, name })
    }

    fn parse_user_options(&mut self) -> ParseResult<(Option<String>, Option<bool>)> {
        let password = if self.eat_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Password)?;
            Some(self.parse_string()?)
        } else {
            None
        };

        let superuser = if self.eat_keyword(Keyword::Superuser) {
            Some(true)
        } else if self.eat_keyword(Keyword::Nosuperuser) {
            Some(false)
        } else {
            None
        };

        Ok((password, superuser))
    }

    // === Права ===

    /// GRANT permission ON resource TO role
    pub(crate) fn parse_grant(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Grant)?;
        let permission = self.parse_permission()?;
        self.expect_keyword(Keyword::On)?;
        let resource = self.parse_resource()?;
        self.expect_keyword(Keyword::To)?;
        let role = self.parse_role_name()?;

        Ok(Statement::Grant(GrantStatement {
            permission,
            resource,
            role,
        }))
    }

    /// REVOKE permission ON resource FROM role
    pub(crate) fn parse_revoke(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::Revoke)?;
        let permission = self.parse_permission()?;
        self.expect_keyword(Keyword::On)?;
        let resource = self.parse_resource()?;
        self.expect_keyword(Keyword::From)?;
        let role = self.parse_role_name()?;

        Ok(Statement::Revoke(RevokeStatement {
            permission,
            resource,
            role,
        }))
    }

    /// `ALL [PERMISSIONS]` или одно право с необязательным `PERMISSION`
    fn parse_permission(&mut self) -> ParseResult<Permission> {
        if self.eat_keyword(Keyword::All) {
            self.eat_keyword(Keyword::Permissions);
            return Ok(Permission::All);
        }

        for (keyword, permission) in PERMISSIONS {
            if self.eat_keyword(keyword) {
                self.eat_keyword(Keyword::Permission);
                return Ok(permission);
            }
        }

        Err(self.error_here())
    }

    /// Защищаемый ресурс
    fn parse_resource(&mut self) -> ParseResult<Resource> {
        if self.eat_keyword(Keyword::All) {
            if self.eat_keyword(Keyword::Keyspaces) {
                return Ok(Resource::AllKeyspaces);
            }
            if self.eat_keyword(Keyword::Roles) {
                return Ok(Resource::AllRoles);
            }
            self.expect_keyword(Keyword::Functions)?;
            if self.eat_keyword(Keyword::In) {
                self.expect_keyword(Keyword::Keyspace)?;
                return Ok(Resource::AllFunctionsInKeyspace(self.parse_identifier()?));
            }
            return Ok(Resource::AllFunctions);
        }
        if self.eat_keyword(Keyword::Keyspace) {
            return Ok(Resource::Keyspace(self.parse_identifier()?));
        }
        if self.eat_keyword(Keyword::Role) {
            return Ok(Resource::Role(self.parse_role_name()?));
        }
        if self.eat_keyword(Keyword::Function) {
            let name = self.parse_qualified_name()?;
            let arg_types = self.parse_type_list()?;
            return Ok(Resource::Function { name, arg_types });
        }

        if !self.eat_keyword(Keyword::Table) {
            self.eat_keyword(Keyword::Columnfamily);
        }
        Ok(Resource::Table(self.parse_qualified_name()?))
    }

    /// LIST ROLES [OF r] [NORECURSIVE] | LIST USERS | LIST permission [ON resource] [OF r] [NORECURSIVE]
    pub(crate) fn parse_list(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::List)?;

        if self.eat_keyword(Keyword::Roles) {
            let of = self.parse_of_role()?;
            let norecursive = self.eat_keyword(Keyword::Norecursive);
            return Ok(Statement::ListRoles(ListRolesStatement { of, norecursive }));
        }
        if self.eat_keyword(Keyword::Users) {
            return Ok(Statement::ListUsers);
        }

        let permission = self.parse_permission()?;
        let resource = if self.eat_keyword(Keyword::On) {
            Some(self.parse_resource()?)
        } else {
            None
        };
        let of = self.parse_of_role()?;
        let norecursive = self.eat_keyword(Keyword::Norecursive);

        Ok(Statement::ListPermissions(ListPermissionsStatement {
            permission,
            resource,
            of,
            norecursive,
        }))
    }

    fn parse_of_role(&mut self) -> ParseResult<Option<Identifier>> {
        if self.eat_keyword(Keyword::Of) {
            Ok(Some(self.parse_role_name()?))
        } else {
            Ok(None)
        }
    }
}
