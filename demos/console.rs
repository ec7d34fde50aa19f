use grid_astar::{path_cost, CellEdit, Coordinate, Grid, PathFinder};

// Stands in for an interactive front end: a few edits are applied to a 10x10 grid the way
// mouse clicks would apply them, then a search is triggered and the overlay is printed.
//
// S marks the start, G the goal, # a wall and * the path found between them.
fn main() {
    let mut grid = Grid::square(10);
    let edits = [
        (CellEdit::Start, Coordinate::new(1, 1)),
        (CellEdit::Goal, Coordinate::new(8, 7)),
        // A goal may not overwrite the start
        (CellEdit::Goal, Coordinate::new(1, 1)),
    ];
    for (edit, coord) in edits {
        grid.apply(edit, coord);
    }
    for row in 0..8 {
        grid.apply(CellEdit::Wall, Coordinate::new(row, 4));
    }
    for col in 5..9 {
        grid.apply(CellEdit::Wall, Coordinate::new(6, col));
    }
    println!("{}", grid);

    let finder = PathFinder::new();
    match finder.find_and_mark(&mut grid) {
        Ok(path) => {
            println!("Path of {} steps:", path_cost(&path));
            println!("{}", grid);
        }
        Err(e) => println!("No path: {}", e),
    }

    // Seal the goal off and search again
    for coord in [(7, 7), (8, 6), (8, 8), (9, 7)] {
        grid.apply(CellEdit::Wall, Coordinate::from(coord));
    }
    if let Err(e) = finder.find_and_mark(&mut grid) {
        println!("After walling in the goal: {}", e);
        println!("{}", grid);
    }
}
