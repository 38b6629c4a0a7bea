use generics::{
    Function, GenericsError, Operation, Shape, Type, Value, call, count, every, filter, find,
    find_index, foldl, foldr, identity, inspect, map, max, min, reject, some,
};

fn ints(items: &[i64]) -> Value {
    Value::from_vec(items.to_vec())
}

fn strings(items: &[&str]) -> Value {
    Value::from_vec(items.iter().map(|s| s.to_string()).collect())
}

fn func1<A, R>(f: impl Fn(A) -> R + 'static) -> Value
where
    A: generics::Reflect,
    R: generics::Reflect,
{
    Value::Func(Function::from_fn1(f))
}

fn func2<A, B, R>(f: impl Fn(A, B) -> R + 'static) -> Value
where
    A: generics::Reflect,
    B: generics::Reflect,
    R: generics::Reflect,
{
    Value::Func(Function::from_fn2(f))
}

#[test]
fn test_identity() {
    assert_eq!(identity(Value::Int(1)), Value::Int(1));
    assert_eq!(identity(ints(&[0, 0, 0])), ints(&[0, 0, 0]));
    assert_eq!(call("Identity", vec![Value::Nil]).unwrap(), Some(Value::Nil));
}

#[test]
fn test_map_squares() {
    let result = map(&ints(&[1, 2, 3]), &func1(|i: i64| i * i)).unwrap();
    assert_eq!(result.to_vec::<i64>(), Some(vec![1, 4, 9]));
}

#[test]
fn test_map_to_strings() {
    let result = map(&ints(&[1, 22]), &func1(|i: i64| i.to_string())).unwrap();
    assert_eq!(result, strings(&["1", "22"]));
}

#[test]
fn test_map_nested_slices() {
    let rows = Value::from_vec(vec![vec![1i64, 2], vec![], vec![3]]);
    let lengths = map(&rows, &func1(|row: Vec<i64>| row.len() as i64)).unwrap();
    assert_eq!(lengths, ints(&[2, 0, 1]));
}

#[test]
fn test_filter_and_reject_partition() {
    let input = ints(&[1, 2, 3, 4, 5, 6]);
    let even = func1(|i: i64| i % 2 == 0);
    assert_eq!(filter(&input, &even).unwrap(), ints(&[2, 4, 6]));
    assert_eq!(reject(&input, &even).unwrap(), ints(&[1, 3, 5]));
}

#[test]
fn test_filter_strings() {
    let words = strings(&["apple", "kiwi", "banana"]);
    let long = func1(|s: String| s.len() > 4);
    assert_eq!(filter(&words, &long).unwrap(), strings(&["apple", "banana"]));
}

#[test]
fn test_folds() {
    let add = func2(|i: i64, j: i64| i + j);
    let sub = func2(|i: i64, j: i64| i - j);
    assert_eq!(foldr(&ints(&[1, 2, 3]), &Value::Int(1), &add).unwrap(), Value::Int(7));
    assert_eq!(foldl(&ints(&[3, 2, 1]), &Value::Int(6), &sub).unwrap(), Value::Int(0));
    assert_eq!(foldr(&ints(&[]), &Value::Int(9), &add).unwrap(), Value::Int(9));
}

#[test]
fn test_fold_joins_strings() {
    let join = func2(|s: String, acc: String| {
        if acc.is_empty() { s } else { format!("{},{}", acc, s) }
    });
    let joined = foldr(&strings(&["a", "b", "c"]), &Value::from(""), &join).unwrap();
    assert_eq!(joined, Value::from("a,b,c"));
}

#[test]
fn test_searches() {
    let even = func1(|i: i64| i % 2 == 0);
    let big = func1(|i: i64| i > 4);
    let input = ints(&[1, 2, 3]);

    assert_eq!(find(&input, &even).unwrap(), Some(Value::Int(2)));
    assert_eq!(find(&input, &big).unwrap(), None);
    assert_eq!(find_index(&input, &even).unwrap(), 1);
    assert_eq!(find_index(&input, &big).unwrap(), -1);
    assert!(some(&input, &even).unwrap());
    assert!(!every(&input, &even).unwrap());
    assert_eq!(count(&input, &even).unwrap(), 1);
}

#[test]
fn test_max_min() {
    let less = func2(|a: i64, b: i64| a < b);
    assert_eq!(max(&ints(&[1, 2, 3]), &less).unwrap(), Some(Value::Int(3)));
    assert_eq!(min(&ints(&[1, 2, 3]), &less).unwrap(), Some(Value::Int(1)));
    assert_eq!(max(&ints(&[]), &less).unwrap(), None);

    let by_len = func2(|a: String, b: String| a.len() < b.len());
    let words = strings(&["pear", "fig", "banana"]);
    assert_eq!(max(&words, &by_len).unwrap(), Some(Value::from("banana")));
    assert_eq!(min(&words, &by_len).unwrap(), Some(Value::from("fig")));
}

#[test]
fn test_named_slice_is_a_sequence() {
    let list_ty = Type::named("IntList", Type::slice_of(Type::Int));
    let list = Value::named(list_ty.clone(), ints(&[1, 2, 3])).unwrap();
    assert_eq!(
        inspect(&list),
        Shape::Sequence {
            element: Type::Int,
            len: 3
        }
    );
    let doubled = map(&list, &func1(|i: i64| i * 2)).unwrap();
    assert_eq!(doubled, ints(&[2, 4, 6]));

    let odd = filter(&list, &func1(|i: i64| i % 2 == 1)).unwrap();
    assert_eq!(odd.ty(), list_ty);
    assert_eq!(odd.to_vec::<i64>(), Some(vec![1, 3]));
}

#[test]
fn test_inspect_shapes() {
    assert_eq!(inspect(&Value::Int(3)), Shape::Other(Type::Int));
    match inspect(&func1(|b: bool| !b)) {
        Shape::Callable(sig) => assert_eq!(sig.to_string(), "func(bool) bool"),
        other => panic!("expected callable, got {:?}", other),
    }
}

#[test]
fn test_call_by_name_chain() {
    let doubled = call("Map", vec![ints(&[1, 2, 3, 4]), func1(|i: i64| i * 2)])
        .unwrap()
        .unwrap();
    let big = call("Filter", vec![doubled, func1(|i: i64| i > 4)])
        .unwrap()
        .unwrap();
    let total = call(
        "Foldl",
        vec![big, Value::Int(0), func2(|acc: i64, i: i64| acc + i)],
    )
    .unwrap();
    assert_eq!(total, Some(Value::Int(14)));
}

#[test]
fn test_inputs_are_not_mutated() {
    let input = ints(&[3, 1, 2]);
    let snapshot = input.clone();
    let _ = map(&input, &func1(|i: i64| i + 1)).unwrap();
    let _ = filter(&input, &func1(|i: i64| i > 1)).unwrap();
    let _ = foldl(&input, &Value::Int(0), &func2(|acc: i64, i: i64| acc + i)).unwrap();
    assert_eq!(input, snapshot);
}

#[test]
fn test_callback_error_yields_no_partial_result() {
    let fails_on_three = Value::Func(Function::new(
        generics::FuncType::new(vec![Type::Int], vec![Type::Bool]),
        |args| match args {
            [Value::Int(3)] => Err("three".to_string()),
            [_] => Ok(vec![Value::Bool(true)]),
            _ => Err("arity".to_string()),
        },
    ));
    let err = filter(&ints(&[1, 2, 3, 4]), &fails_on_three).unwrap_err();
    assert_eq!(
        err,
        GenericsError::Callback {
            op: Operation::Filter,
            index: 2,
            message: "three".to_string(),
        }
    );
}

#[test]
fn test_callback_lying_about_its_type_is_reported() {
    let liar = Value::Func(Function::new(
        generics::FuncType::new(vec![Type::Int], vec![Type::Int]),
        |_| Ok(vec![Value::from("not an int")]),
    ));
    let err = map(&ints(&[1]), &liar).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Map: callback error at index 0: return value 0 has type string, declared int"
    );
}
