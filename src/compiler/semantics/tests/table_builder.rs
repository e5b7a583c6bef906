#[cfg(test)]
mod table_builder_tests {
    use crate::compiler::{
        ast::{build::*, *},
        semantics::{
            build_symbol_table, symbol_table::Entry, symbol_table_dump, SemanticError,
        },
        CompilerOptions, Position,
    };

    fn main_proc() -> GlobalDeclaration {
        proc_decl("main", vec![], vec![], vec![])
    }

    fn build(declarations: Vec<GlobalDeclaration>) -> Result<(), SemanticError> {
        let program = program(declarations);
        build_symbol_table(&program, &CompilerOptions::default())
            .map(|_| ())
            .map_err(|e| e.into_inner())
    }

    #[test]
    pub fn test_entry_point() {
        for (declarations, expected) in vec![
            (vec![main_proc()], Ok(())),
            (vec![], Err(SemanticError::MainIsMissing("main".into()))),
            (
                vec![proc_decl("other", vec![], vec![], vec![])],
                Err(SemanticError::MainIsMissing("main".into())),
            ),
            (
                vec![type_decl("main", int_type())],
                Err(SemanticError::MainIsNotAProcedure("main".into())),
            ),
            (
                vec![proc_decl("main", vec![param("x", int_type())], vec![], vec![])],
                Err(SemanticError::MainMustNotHaveParameters("main".into())),
            ),
        ] {
            assert_eq!(build(declarations), expected);
        }
    }

    #[test]
    pub fn test_custom_entry_point() {
        let program = program(vec![proc_decl("start", vec![], vec![], vec![])]);
        let options = CompilerOptions {
            entry_point: "start".into(),
            ..CompilerOptions::default()
        };
        assert!(build_symbol_table(&program, &options).is_ok());
        assert_eq!(
            build_symbol_table(&program, &CompilerOptions::default())
                .unwrap_err()
                .into_inner(),
            SemanticError::MainIsMissing("main".into())
        );
    }

    #[test]
    pub fn test_redeclarations() {
        for (declarations, expected) in vec![
            (
                vec![type_decl("T", int_type()), type_decl("T", int_type())],
                SemanticError::RedeclarationAsType("T".into()),
            ),
            (
                vec![type_decl("int", int_type())],
                SemanticError::RedeclarationAsType("int".into()),
            ),
            (
                vec![main_proc(), type_decl("main", int_type())],
                SemanticError::RedeclarationAsType("main".into()),
            ),
            (
                vec![type_decl("f", int_type()), proc_decl("f", vec![], vec![], vec![])],
                SemanticError::RedeclarationAsProcedure("f".into()),
            ),
            (
                vec![main_proc(), main_proc()],
                SemanticError::RedeclarationAsProcedure("main".into()),
            ),
            (
                vec![proc_decl("printi", vec![], vec![], vec![])],
                SemanticError::RedeclarationAsProcedure("printi".into()),
            ),
            (
                vec![proc_decl(
                    "main",
                    vec![],
                    vec![var_decl("x", int_type()), var_decl("x", int_type())],
                    vec![],
                )],
                SemanticError::RedeclarationAsVariable("x".into()),
            ),
            (
                vec![proc_decl(
                    "f",
                    vec![param("x", int_type())],
                    vec![var_decl("x", int_type())],
                    vec![],
                )],
                SemanticError::RedeclarationAsVariable("x".into()),
            ),
            (
                vec![proc_decl(
                    "f",
                    vec![param("x", int_type()), param("x", int_type())],
                    vec![],
                    vec![],
                )],
                SemanticError::RedeclarationAsParameter("x".into()),
            ),
        ] {
            assert_eq!(build(declarations), Err(expected));
        }
    }

    #[test]
    pub fn test_type_resolution_errors() {
        for (declarations, expected) in vec![
            (
                vec![type_decl("T", named_type("U"))],
                SemanticError::UndefinedType("U".into()),
            ),
            (
                vec![main_proc(), type_decl("T", named_type("main"))],
                SemanticError::NotAType("main".into()),
            ),
            (
                vec![proc_decl(
                    "main",
                    vec![],
                    vec![var_decl("x", named_type("y"))],
                    vec![],
                )],
                SemanticError::UndefinedType("y".into()),
            ),
            (
                vec![proc_decl(
                    "main",
                    vec![],
                    vec![var_decl("x", int_type()), var_decl("y", named_type("x"))],
                    vec![],
                )],
                SemanticError::NotAType("x".into()),
            ),
            (
                vec![type_decl(
                    "A",
                    array_type(3, array_type(2, named_type("missing"))),
                )],
                SemanticError::UndefinedType("missing".into()),
            ),
        ] {
            assert_eq!(build(declarations), Err(expected));
        }
    }

    #[test]
    pub fn test_duplicate_record_field() {
        for fields in vec![
            vec![var_decl("a", int_type()), var_decl("a", int_type())],
            vec![
                var_decl("a", int_type()),
                var_decl("b", int_type()),
                var_decl("a", named_type("bool")),
            ],
            vec![
                var_decl("b", int_type()),
                var_decl("a", int_type()),
                var_decl("a", int_type()),
            ],
        ] {
            assert_eq!(
                build(vec![type_decl("R", record_type(fields))]),
                Err(SemanticError::FieldAlreadyExists("a".into()))
            );
        }
    }

    #[test]
    pub fn test_duplicate_field_reported_at_field() {
        let program = program(vec![type_decl(
            "R",
            record_type(vec![
                var_decl("a", int_type()),
                var_decl_at(Position::new(4, 7), "a", int_type()),
            ]),
        )]);
        let err = build_symbol_table(&program, &CompilerOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "L4:7: record field 'a' already exists");
    }

    #[test]
    pub fn test_aggregate_parameters_must_be_references() {
        for (declarations, expected) in vec![
            (
                vec![
                    type_decl("A", array_type(3, int_type())),
                    proc_decl("f", vec![param("a", named_type("A"))], vec![], vec![]),
                    main_proc(),
                ],
                Err(SemanticError::MustBeAReferenceParameter("a".into())),
            ),
            (
                vec![
                    type_decl("R", record_type(vec![var_decl("x", int_type())])),
                    proc_decl("f", vec![param("r", named_type("R"))], vec![], vec![]),
                    main_proc(),
                ],
                Err(SemanticError::MustBeAReferenceParameter("r".into())),
            ),
            (
                vec![
                    type_decl("A", array_type(3, int_type())),
                    proc_decl("f", vec![ref_param("a", named_type("A"))], vec![], vec![]),
                    main_proc(),
                ],
                Ok(()),
            ),
            (
                vec![
                    proc_decl("f", vec![ref_param("x", int_type())], vec![], vec![]),
                    main_proc(),
                ],
                Ok(()),
            ),
        ] {
            assert_eq!(build(declarations), expected);
        }
    }

    #[test]
    pub fn test_resolved_types_are_written_to_slots() {
        let program = program(vec![
            type_decl(
                "P",
                record_type(vec![var_decl("a", int_type()), var_decl("b", int_type())]),
            ),
            type_decl("V", array_type(4, named_type("P"))),
            main_proc(),
        ]);
        build_symbol_table(&program, &CompilerOptions::default()).unwrap();

        let record = Type::record(vec![
            RecordField::new("a".into(), Type::INT),
            RecordField::new("b".into(), Type::INT),
        ]);
        match &program.declarations[1] {
            GlobalDeclaration::Type(t) => {
                assert_eq!(t.type_expression.ty(), &Type::array(record.clone(), 4));
                assert_eq!(t.type_expression.ty().byte_size(), 32);
            }
            _ => panic!("Expected a type declaration"),
        }
        match &program.declarations[0] {
            GlobalDeclaration::Type(t) => {
                let rt = t.type_expression.ty().as_record().unwrap();
                assert_eq!(rt.byte_size(), 8);
                assert_eq!(rt.field_offset(&"b".into()), Some(4));
            }
            _ => panic!("Expected a type declaration"),
        }
    }

    #[test]
    pub fn test_procedure_entry() {
        let program = program(vec![
            type_decl("P", array_type(3, int_type())),
            proc_decl(
                "f",
                vec![ref_param("p", named_type("P")), param("n", int_type())],
                vec![var_decl("i", int_type())],
                vec![],
            ),
            main_proc(),
        ]);
        let table = build_symbol_table(&program, &CompilerOptions::default()).unwrap();

        let f = table.procedure(&"f".into()).unwrap();
        assert!(!f.is_builtin);
        assert!(!f.stack_layout.is_allocated());
        let signature: Vec<_> = f
            .parameter_types
            .iter()
            .map(|p| (p.ty.clone(), p.is_reference, p.offset))
            .collect();
        assert_eq!(
            signature,
            vec![
                (Type::array(Type::INT, 3), true, None),
                (Type::INT, false, None)
            ]
        );

        let names: Vec<_> = table
            .scope(f.local_scope)
            .entries()
            .map(|(n, _)| n.to_string())
            .collect();
        assert_eq!(names, vec!["p", "n", "i"]);
        assert_eq!(table.scope(f.local_scope).parent(), Some(table.global()));

        match table.find(table.global(), &"P".into()) {
            Some(Entry::Type(t)) => assert_eq!(t.ty, Type::array(Type::INT, 3)),
            _ => panic!("Expected P to be a type"),
        }
    }

    #[test]
    pub fn test_types_too_large_for_the_target() {
        let huge = || array_type(300_000_000, int_type());
        for (declarations, expected) in vec![
            (
                vec![type_decl("Big", array_type(1_000_000_000, int_type())), main_proc()],
                SemanticError::TypeTooLarge(Type::array(Type::INT, 1_000_000_000)),
            ),
            (
                vec![
                    type_decl("Pair", record_type(vec![var_decl("a", huge()), var_decl("b", huge())])),
                    main_proc(),
                ],
                SemanticError::TypeTooLarge(Type::record(vec![
                    RecordField::new("a".into(), Type::array(Type::INT, 300_000_000)),
                    RecordField::new("b".into(), Type::array(Type::INT, 300_000_000)),
                ])),
            ),
            (
                vec![proc_decl(
                    "main",
                    vec![],
                    vec![var_decl("a", huge()), var_decl("b", huge())],
                    vec![],
                )],
                SemanticError::LocalVariablesTooLarge("main".into()),
            ),
        ] {
            assert_eq!(build(declarations), Err(expected));
        }

        let fits = vec![
            type_decl("Big", array_type(300_000_000, int_type())),
            proc_decl("main", vec![], vec![var_decl("x", named_type("Big"))], vec![]),
        ];
        assert_eq!(build(fits), Ok(()));
    }

    #[test]
    pub fn test_local_variable_shadows_global_type() {
        let program = program(vec![
            type_decl("T", int_type()),
            proc_decl("main", vec![], vec![var_decl("T", int_type())], vec![]),
        ]);
        let table = build_symbol_table(&program, &CompilerOptions::default()).unwrap();
        let main = table.procedure(&"main".into()).unwrap();
        assert!(matches!(
            table.find(main.local_scope, &"T".into()),
            Some(Entry::Variable(_))
        ));
    }

    #[test]
    pub fn test_symbol_table_dump() {
        let program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", int_type())],
            vec![],
        )]);
        let table = build_symbol_table(&program, &CompilerOptions::default()).unwrap();
        let dump = symbol_table_dump(&program, &table);
        assert!(dump.starts_with("Symbol table at end of procedure 'main':\n"));
        assert!(dump.contains("x | var | int | NULL"));
    }
}
