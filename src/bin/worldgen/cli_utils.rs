use trailhead::GridCell;
use trailhead::errors::{TrailheadError, TrailheadResult};
use trailhead::terrain::constants::MAX_GRID_SIZE;

/// Generic parser for delimited strings that return tuples
pub fn parse_delimited<T, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Result<T, std::num::ParseIntError>,
) -> TrailheadResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).collect();
    if parts.len() != N {
        return Err(TrailheadError::InvalidArgument {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part.trim()).map_err(|_| TrailheadError::InvalidArgument {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> TrailheadResult<(u32, u32)> {
    let [width, height] = parse_delimited::<u32, 2>(size_str, 'x', "size", |s| s.parse())?;

    if width == 0 || height == 0 {
        return Err(TrailheadError::InvalidArgument {
            reason: "Width and height must be greater than 0".to_string(),
        });
    }

    if width > MAX_GRID_SIZE || height > MAX_GRID_SIZE {
        return Err(TrailheadError::InvalidArgument {
            reason: format!("Width and height must not exceed {MAX_GRID_SIZE}"),
        });
    }

    Ok((width, height))
}

/// Parse count range string "MIN,MAX" with validation
pub fn parse_count_range(range_str: &str) -> TrailheadResult<(u32, u32)> {
    let [min, max] = parse_delimited::<u32, 2>(range_str, ',', "count range", |s| s.parse())?;

    if min > max {
        return Err(TrailheadError::InvalidArgument {
            reason: "Minimum count must be less than or equal to maximum count".to_string(),
        });
    }

    Ok((min, max))
}

/// Parse cell string "X,Y"
pub fn parse_cell(cell_str: &str) -> TrailheadResult<GridCell> {
    let [x, y] = parse_delimited::<u32, 2>(cell_str, ',', "cell", |s| s.parse())?;
    Ok(GridCell::new(x, y))
}

/// Parse path query string "X,Y:X,Y"
pub fn parse_path_query(query: &str) -> TrailheadResult<(GridCell, GridCell)> {
    let Some((start, goal)) = query.split_once(':') else {
        return Err(TrailheadError::InvalidArgument {
            reason: format!("Invalid path format '{query}'. Expected X,Y:X,Y"),
        });
    };
    Ok((parse_cell(start)?, parse_cell(goal)?))
}
