use super::Position;

pub fn sq(algebraic: &str) -> Position {
    Position::from_algebraic(algebraic).unwrap()
}

pub fn assert_moves(generated: Vec<Position>, mut expected: Vec<&str>) {
    let mut generated_converted: Vec<_> = generated.iter().map(|p| p.as_algebraic()).collect();
    generated_converted.sort();
    expected.sort();

    assert_eq!(generated_converted, expected);
}
