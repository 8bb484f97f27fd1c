//! Tests for cell states, grid construction and grid status

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::executor::{CollapseEngine, generate};
    use tilecollapse::io::configuration::MAX_GRID_DIMENSION;
    use tilecollapse::io::error::AlgorithmError;
    use tilecollapse::spatial::direction::Position;
    use tilecollapse::spatial::grid::{Cell, Grid, GridStatus};
    use tilecollapse::spatial::tiles::TileRegistry;

    // Tests a fresh grid has every cell open and pending
    // Verified by leaving the pending set empty
    #[test]
    fn test_new_grid() {
        let grid = Grid::new(4, 3, TileBitset::all(2)).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.area(), 12);
        assert_eq!(grid.pending_count(), 12);
        assert!(grid.is_pending(Position::new(3, 2)));
        assert_eq!(grid.status(), GridStatus::Generating);
        assert_eq!(grid.cell(Position::new(3, 2)).map(Cell::remaining), Some(2));
        assert!(grid.cell(Position::new(4, 0)).is_none());
        assert_eq!(grid.tile_at(Position::new(0, 0)), None);
        assert!(grid.contradictions().is_empty());
    }

    // Tests pending positions iterate in (x, y) order
    // Verified by iterating row-major
    #[test]
    fn test_pending_order() {
        let grid = Grid::new(2, 2, TileBitset::all(1)).unwrap();
        let pending: Vec<Position> = grid.pending().collect();
        assert_eq!(
            pending,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    // Tests out-of-range dimensions are rejected
    // Verified by removing the zero-size check
    #[test]
    fn test_invalid_dimensions() {
        for (width, height) in [(0, 5), (5, 0), (0, 0), (MAX_GRID_DIMENSION + 1, 1)] {
            let result = Grid::new(width, height, TileBitset::all(2));
            assert!(matches!(
                result,
                Err(AlgorithmError::InvalidDimensions { .. })
            ));
        }
    }

    // Tests an empty starting set is rejected
    // Verified by allowing empty possibility sets
    #[test]
    fn test_empty_tile_set() {
        let result = Grid::new(3, 3, TileBitset::new(2));
        assert!(matches!(result, Err(AlgorithmError::InvalidRule { .. })));
    }

    // Tests cell state accessors
    // Verified by counting a contradiction as one remaining tile
    #[test]
    fn test_cell_accessors() {
        let open = Cell::Uncollapsed {
            possibilities: TileBitset::from_ids([0, 2], 3),
        };
        assert_eq!(open.remaining(), 2);
        assert_eq!(open.tile(), None);
        assert!(!open.is_terminal());

        let done = Cell::Collapsed { tile: 2 };
        assert_eq!(done.remaining(), 1);
        assert_eq!(done.tile(), Some(2));
        assert!(done.is_terminal());

        assert_eq!(Cell::Contradiction.remaining(), 0);
        assert_eq!(Cell::Contradiction.tile(), None);
        assert!(Cell::Contradiction.is_terminal());
    }

    // Tests rows of an unfinished grid and the resolution check
    // Verified by reporting Resolved while cells are pending
    #[test]
    fn test_rows_and_ensure_resolved_while_generating() {
        let grid = Grid::new(3, 2, TileBitset::all(1)).unwrap();
        assert_eq!(grid.rows(), vec![vec![None; 3]; 2]);
        assert!(matches!(
            grid.ensure_resolved(),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }

    // Tests a finished grid with a contradiction reports it
    // Verified by reporting Resolved whenever nothing is pending
    #[test]
    fn test_partially_contradicted_status() {
        // Neither tile permits any neighbour
        let registry = TileRegistry::from_rules(&[
            (0, [vec![], vec![], vec![], vec![]]),
            (1, [vec![], vec![], vec![], vec![]]),
        ])
        .unwrap();
        let grid = generate(&registry, 2, 1, 5).unwrap();

        assert_eq!(grid.status(), GridStatus::PartiallyContradicted);
        assert_eq!(grid.contradictions(), vec![Position::new(0, 0)]);
        assert_eq!(grid.cell(Position::new(0, 0)), Some(&Cell::Contradiction));
        assert!(grid.tile_at(Position::new(1, 0)).is_some());
        assert!(matches!(
            grid.ensure_resolved(),
            Err(AlgorithmError::Contradiction { positions }) if positions == vec![Position::new(0, 0)]
        ));
    }

    // Tests rows are indexed rows[y][x]
    // Verified by returning columns instead of rows
    #[test]
    fn test_rows_layout() {
        let registry =
            TileRegistry::from_rules(&[(0, [vec![0], vec![0], vec![0], vec![0]])]).unwrap();
        let grid = generate(&registry, 3, 2, 0).unwrap();

        assert_eq!(grid.status(), GridStatus::Resolved);
        assert!(grid.ensure_resolved().is_ok());
        assert_eq!(grid.rows(), vec![vec![Some(0); 3]; 2]);
    }

    // Tests a fresh grid ranks every position together and a finished one ranks none
    // Verified by seeding the ranking with only the center
    #[test]
    fn test_most_constrained_fresh_and_finished() {
        let grid = Grid::new(3, 2, TileBitset::all(2)).unwrap();
        let mut ranked = grid.most_constrained().to_vec();
        ranked.sort_unstable();
        assert_eq!(ranked, grid.pending().collect::<Vec<_>>());

        let registry =
            TileRegistry::from_rules(&[(0, [vec![0], vec![0], vec![0], vec![0]])]).unwrap();
        let finished = generate(&registry, 3, 2, 0).unwrap();
        assert!(finished.most_constrained().is_empty());
    }

    // Tests contradicted neighbours move to the front of the ranking and leave it once committed
    // Verified by skipping the ranking update when a cell empties
    #[test]
    fn test_most_constrained_follows_contradictions() {
        let registry = TileRegistry::from_rules(&[
            (0, [vec![], vec![], vec![], vec![]]),
            (1, [vec![], vec![], vec![], vec![]]),
        ])
        .unwrap();
        let mut engine = CollapseEngine::new(&registry, 3, 1, 0).unwrap();
        assert!(engine.run_iteration().unwrap());

        let mut ranked = engine.grid().most_constrained().to_vec();
        ranked.sort_unstable();
        assert_eq!(ranked, vec![Position::new(0, 0), Position::new(2, 0)]);

        assert!(engine.run_iteration().unwrap());
        assert_eq!(engine.grid().most_constrained().len(), 1);
        assert!(engine.run_iteration().unwrap());
        assert!(engine.grid().most_constrained().is_empty());
    }
}
