use super::{atom, read_one, run, run_in_env};
use crate::environment::default_env;
use crate::errors::ErrorKind;
use crate::Expression;

#[test]
fn atoms_self_evaluate() {
    assert_eq!(run("42").unwrap(), atom("42"));
    assert_eq!(run("#t").unwrap(), atom("#t"));
    assert_eq!(run("unbound-name").unwrap(), atom("unbound-name"));
    assert_eq!(run("\"hello").unwrap(), atom("\"hello"));
}

#[test]
fn empty_program() {
    assert_eq!(run("").unwrap(), Expression::nil());
}

#[test]
fn last_form_is_the_result() {
    assert_eq!(run("1 2 3").unwrap(), atom("3"));
}

#[test]
fn quote() {
    assert_eq!(run("(quote (a b c))").unwrap(), read_one("(a b c)"));
    assert_eq!(run("(quote a)").unwrap(), atom("a"));
    assert_eq!(run("(quote (+ 1 2))").unwrap(), read_one("(+ 1 2)"));
    assert_eq!(run("(quote a (b))").unwrap(), read_one("(a (b))"));
    assert_eq!(run("(quote)").unwrap(), Expression::nil());
}

#[test]
fn quote_does_not_evaluate() {
    let env = default_env();
    run_in_env("(define a 1)", &env).unwrap();
    assert_eq!(run_in_env("(quote (a (a)))", &env).unwrap(), read_one("(a (a))"));
}

#[test]
fn if_form() {
    assert_eq!(run("(if #t 1 2)").unwrap(), atom("1"));
    assert_eq!(run("(if #f 1 2)").unwrap(), atom("2"));
    assert_eq!(run("(if (eq? 1 1) yes no)").unwrap(), atom("yes"));
    assert_eq!(run("(if #f 1)").unwrap(), Expression::nil());
}

#[test]
fn if_only_evaluates_the_taken_branch() {
    assert_eq!(run("(if #t 1 (error boom))").unwrap(), atom("1"));
    assert_eq!(run("(if #f (error boom) 2)").unwrap(), atom("2"));
}

#[test]
fn if_needs_a_boolean() {
    let err = run("(if 1 2 3)").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeError(_)));
    let err = run("(if (quote ()) 2 3)").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeError(_)));
}

#[test]
fn cond() {
    assert_eq!(run("(cond (#f 1) (else 2))").unwrap(), atom("2"));
    assert_eq!(run("(cond (#f 1))").unwrap(), atom("#f"));
    assert_eq!(run("(cond)").unwrap(), atom("#f"));
    assert_eq!(
        run("(define x 2) (cond ((eq? x 1) one) ((eq? x 2) two) (else many))").unwrap(),
        atom("two")
    );
    assert_eq!(run("(cond (#t (print a) b))").unwrap(), atom("b"));
}

#[test]
fn begin() {
    assert_eq!(run("(begin 1 2 3)").unwrap(), atom("3"));
    assert_eq!(run("(begin)").unwrap(), Expression::nil());
    assert_eq!(run("(begin (define x 5) (+ x 1))").unwrap(), atom("6"));
}

#[test]
fn define_variable() {
    let env = default_env();
    assert_eq!(run_in_env("(define x (+ 1 2))", &env).unwrap(), atom("3"));
    assert_eq!(run_in_env("x", &env).unwrap(), atom("3"));
    run_in_env("(define x 4)", &env).unwrap();
    assert_eq!(run_in_env("x", &env).unwrap(), atom("4"));
}

#[test]
fn define_procedure() {
    assert_eq!(run("(define (f x) (+ x 1)) (f 5)").unwrap(), atom("6"));
    assert_eq!(run("(define (g) 7) (g)").unwrap(), atom("7"));
    assert_eq!(run("(define (h a b) (print a) (- a b)) (h 5 3)").unwrap(), atom("2"));
}

#[test]
fn define_returns_the_closure() {
    let value = run("(define (f x) x)").unwrap();
    assert!(value.is_closure());
    assert_eq!(value.to_string(), "(lambda (x) x)");
}

#[test]
fn lambda() {
    assert_eq!(run("((lambda (x y) (* x y)) 6 7)").unwrap(), atom("42"));
    assert_eq!(run("((lambda () 1))").unwrap(), atom("1"));
    assert_eq!(
        run("(lambda (a b) (+ a b) b)").unwrap().to_string(),
        "(lambda (a b) (+ a b) b)"
    );
}

#[test]
fn special_forms_in_operator_position_are_not_procedures() {
    assert_eq!(run("((if #t + *) 2 3)").unwrap(), atom("5"));
    assert_eq!(run("((if #f + *) 2 3)").unwrap(), atom("6"));
}

#[test]
fn malformed_special_forms() {
    for src in &[
        "(lambda x x)",
        "(lambda (1 (x)) x)",
        "(define)",
        "(define x)",
        "(define x 1 2)",
        "(define () 1)",
        "(define ((f) x) 1)",
        "(if #t)",
        "(if #t 1 2 3)",
        "(cond x)",
    ] {
        let err = run(src).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::SyntaxError(_)),
            "{}: {:?}",
            src,
            err
        );
    }
}
