//! End-to-end rendering of composed templates.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use indexmap::IndexMap;
use tspoet_codegen::{
    Code, ConditionalOutput, Member, RenderConfig, Symbol, TypeName, code, def, imp,
};

#[test]
fn test_anonymous_type() {
    let ty = TypeName::anonymous([
        Member::new("value", TypeName::number()),
        Member::new("value2", TypeName::string()).optional(),
    ]);
    let out = code![ty].render().unwrap();
    assert_eq!(out.body, "{ value: number, value2?: string }");
}

#[test]
fn test_lambda_type() {
    let ty = TypeName::lambda([("a", TypeName::string())], TypeName::any("Test"));
    assert_eq!(code![ty].render().unwrap().body, "(a: string) => Test");
}

#[test]
fn test_lambda_params_keep_insertion_order() {
    let mut params = IndexMap::new();
    params.insert("z".to_string(), TypeName::number());
    params.insert("a".to_string(), TypeName::string());
    let ty = TypeName::Lambda {
        params,
        returns: Box::new(TypeName::void()),
    };
    assert_eq!(code![ty].render().unwrap().body, "(z: number, a: string) => void");
}

#[test]
fn test_module_with_collisions_and_helpers() {
    let local_date = imp("Date@@js-joda/core").unwrap();
    let moment = imp("moment=moment").unwrap();
    let parse = ConditionalOutput::new(
        "parseDate",
        code![
            "function parseDate(raw: string): ",
            local_date.clone(),
            " {\n",
            code!["return ", moment.clone(), "(raw).toDate();"],
            "\n}\n",
        ],
    );

    let file = code![
        parse.if_used(),
        "export class ",
        def("Event"),
        " {\n",
        code![
            "start: ",
            TypeName::from_symbol(local_date.clone()),
            ";\n",
            "end: ",
            TypeName::number(),
            ";\n",
            "constructor(raw: string) {\n",
            code!["this.start = ", parse.usage(), "(raw);"],
            "\n}\n",
        ],
        "}",
    ];

    insta::assert_snapshot!(file.to_file_string().unwrap(), @r#"
import { Date } from "@js-joda/core";
import moment from "moment";

function parseDate(raw: string): Date {
  return moment(raw).toDate();
}
export class Event {
  start: Date;
  end: number;
  constructor(raw: string) {
    this.start = parseDate(raw);
  }
}
"#);
}

#[test]
fn test_colliding_imports_each_get_an_alias() {
    let a = Symbol::named("Client", "./http");
    let b = Symbol::named("Client", "./db");
    let file = code![
        "const http = new ",
        &a,
        "();\n",
        "const db = new ",
        &b,
        "();\n",
        "ping(",
        &a,
        ", ",
        &b,
        ");",
    ];

    insta::assert_snapshot!(file.to_file_string().unwrap(), @r#"
import { Client } from "./http";
import { Client as Client1 } from "./db";

const http = new Client();
const db = new Client1();
ping(Client, Client1);
"#);
}

#[test]
fn test_requested_alias_is_used() {
    let file = code![Symbol::named("Observable", "rxjs").with_alias("Obs"), ".of(1);"];
    assert_eq!(
        file.to_file_string().unwrap(),
        "import { Observable as Obs } from \"rxjs\";\n\nObs.of(1);\n"
    );
}

#[test]
fn test_namespace_and_side_effect_imports() {
    let file = code![
        imp("+./polyfills").unwrap(),
        TypeName::any("path.join*node:path"),
        "(a, b);",
    ];
    assert_eq!(
        file.to_file_string().unwrap(),
        "import \"./polyfills\";\nimport * as path from \"node:path\";\n\npath.join(a, b);\n"
    );
}

#[test]
fn test_symbols_from_own_module_are_not_imported() {
    let config = RenderConfig::default().with_module_path("./models/user");
    let file = code![
        "const u: ",
        TypeName::any("User@./models/user"),
        " = load(",
        TypeName::any("Id@./models/id"),
        ");",
    ];
    assert_eq!(
        file.to_file_string_with(&config).unwrap(),
        "import { Id } from \"./models/id\";\n\nconst u: User = load(Id);\n"
    );
}

#[test]
fn test_shared_subtree_renders_identically_in_fresh_renders() {
    let shared = code!["x: ", TypeName::any("Foo@./a"), ", y: ", TypeName::any("Foo@./b")];
    let tree = code!["f(", shared.clone(), ");\n", "g(", shared, ");"];

    let first = tree.render().unwrap();
    let second = tree.render().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.body, "f(x: Foo, y: Foo1);\ng(x: Foo, y: Foo1);");
    assert_eq!(first.imports.entries().count(), 2);
}

#[test]
fn test_dead_branch_registers_nothing() {
    let unused = code!["new ", Symbol::named("Unused", "./unused"), "()"];
    let helper = ConditionalOutput::new("helper", unused);
    let file = code![helper.if_used(), "run();"];
    let rendered = file.render().unwrap();
    assert!(rendered.imports.is_empty());
    assert_eq!(rendered.body, "run();");
}

#[test]
fn test_empty_code_renders_nothing() {
    assert_eq!(Code::new().to_file_string().unwrap(), "");
}
