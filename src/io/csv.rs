use std::io::{self, Write};

use crate::dynamics::state::VehicleState;

/// Write descent telemetry to CSV format.
///
/// Columns: time, altitude, v_down, horiz_pos, horiz_speed,
///          descent_fuel, ascent_fuel
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[VehicleState]) -> io::Result<()> {
    writeln!(
        writer,
        "time,altitude,v_down,horiz_pos,horiz_speed,descent_fuel,ascent_fuel"
    )?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.2},{:.4},{:.4},{:.4},{:.4},{:.3},{:.1}",
            s.time,
            s.altitude,
            s.v_down,
            s.horiz_pos,
            s.horiz_speed,
            s.descent_fuel,
            s.ascent_fuel,
        )?;
    }

    Ok(())
}

/// Write telemetry to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[VehicleState]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = vec![
            VehicleState {
                time: 0.0,
                altitude: 7500.0,
                v_down: 300.0,
                horiz_pos: 0.0,
                horiz_speed: 100.0,
                descent_fuel: 1500.0,
                ascent_fuel: 5187.0,
            },
            VehicleState {
                time: 0.1,
                altitude: 7470.0,
                v_down: 299.0,
                horiz_pos: 10.0,
                horiz_speed: 100.0,
                descent_fuel: 1490.0,
                ascent_fuel: 5187.0,
            },
        ];

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,altitude"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.00,7500.0000,"));
        assert!(lines[2].ends_with(",1490.000,5187.0"));
    }
}
