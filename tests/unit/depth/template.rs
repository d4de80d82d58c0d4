//! Tests for template normalization and nearest-neighbor resampling

#[cfg(test)]
mod tests {
    use ndarray::array;
    use sirds::StereogramError;
    use sirds::depth::DepthTemplate;
    use sirds::depth::template::resample;

    fn rows(lines: &[&str]) -> DepthTemplate {
        DepthTemplate::RowStrings(lines.iter().map(ToString::to_string).collect())
    }

    // Tests the documented encodings all describe the same template
    // Verified by mapping blanks to level 1
    #[test]
    fn test_equivalent_encodings() {
        let expected = array![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];

        assert_eq!(rows(&["   ", " # ", "   "]).normalize().unwrap(), expected);
        assert_eq!(rows(&["000", "010", "000"]).normalize().unwrap(), expected);
        assert_eq!(DepthTemplate::from("   \n # \n   ").normalize().unwrap(), expected);
        assert_eq!(DepthTemplate::from("000\n010\n000").normalize().unwrap(), expected);
        assert_eq!(
            DepthTemplate::from(vec![vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0; 3]])
                .normalize()
                .unwrap(),
            expected
        );
    }

    // Tests digit levels are scaled by the highest level
    // Verified by scaling by 9 instead of the maximum
    #[test]
    fn test_levels_scaled_by_highest() {
        let template = DepthTemplate::from("001\n012\n123").normalize().unwrap();

        assert_eq!(template.get((0, 2)), Some(&(1.0 / 3.0)));
        assert_eq!(template.get((1, 2)), Some(&(2.0 / 3.0)));
        assert_eq!(template.get((2, 2)), Some(&1.0));
    }

    // Tests short rows are padded with zeros to the widest row
    // Verified by padding with the highest level
    #[test]
    fn test_ragged_rows_padded() {
        let template = DepthTemplate::NumericGrid(vec![vec![2.0], vec![1.0, 4.0]])
            .normalize()
            .unwrap();

        assert_eq!(template, array![[0.5, 0.0], [0.25, 1.0]]);
    }

    // Tests carriage returns and trailing newlines in multiline text
    // Verified by mapping '\r' to level 1
    #[test]
    fn test_multiline_line_endings() {
        let template = DepthTemplate::from("1\r\n2\n").normalize().unwrap();

        assert_eq!(template, array![[0.5], [1.0], [0.0]]);
    }

    // Tests an all-zero template is a flat plane rather than NaN
    // Verified by dividing by a zero highest level
    #[test]
    fn test_all_zero_template() {
        let template = DepthTemplate::from("0").normalize().unwrap();

        assert_eq!(template, array![[0.0]]);
    }

    // Tests invalid templates fail with a format error
    // Verified by accepting empty row lists
    #[test]
    fn test_invalid_templates() {
        let cases = [
            DepthTemplate::RowStrings(Vec::new()),
            DepthTemplate::NumericGrid(Vec::new()),
            DepthTemplate::NumericGrid(vec![Vec::new(), Vec::new()]),
            DepthTemplate::from(""),
            DepthTemplate::NumericGrid(vec![vec![1.0, f64::INFINITY]]),
            DepthTemplate::NumericGrid(vec![vec![f64::NAN]]),
        ];

        for template in cases {
            assert!(
                matches!(
                    template.normalize(),
                    Err(StereogramError::TemplateFormat { .. })
                ),
                "{template:?} should be rejected"
            );
        }
    }

    // Tests 3x3 template resampled to 6x6 follows nearest-neighbor indices
    // Verified by rounding instead of flooring template indices
    #[test]
    fn test_resample_three_to_six() {
        let template = DepthTemplate::from("000\n010\n000");
        let normalized = template.normalize().unwrap();
        let depth = template.to_depth_map(6, 6).unwrap();

        for y in 0..6 {
            for x in 0..6 {
                let expected = normalized.get((y * 3 / 6, x * 3 / 6)).copied();
                assert_eq!(depth.get(x, y), expected, "pixel ({x}, {y})");
            }
        }
        assert_eq!(depth.get(2, 2), Some(1.0));
        assert_eq!(depth.get(3, 3), Some(1.0));
        assert_eq!(depth.get(4, 3), Some(0.0));
    }

    // Tests downsampling picks the floor-mapped template cells
    // Verified by sampling template centers
    #[test]
    fn test_resample_down() {
        let template = array![[0.0, 0.1, 0.2, 0.3], [0.4, 0.5, 0.6, 0.7]];

        let sampled = resample(&template, 2, 1);

        assert_eq!(sampled, array![[0.0, 0.2]]);
    }

    // Tests zero output dimensions fail before normalization
    // Verified by resampling into an empty grid
    #[test]
    fn test_to_depth_map_zero_dimensions() {
        let result = DepthTemplate::from("1").to_depth_map(0, 4);

        assert!(matches!(result, Err(StereogramError::Dimension { .. })));
    }

    // Tests conversions into the tagged union
    // Verified by parsing strings as single rows
    #[test]
    fn test_conversions() {
        let parsed: DepthTemplate = "01\n10".parse().unwrap();
        let from_rows = DepthTemplate::from(vec!["01".to_string(), "10".to_string()]);

        assert_eq!(parsed, DepthTemplate::MultilineString("01\n10".to_string()));
        assert_eq!(parsed.normalize().unwrap(), from_rows.normalize().unwrap());
    }
}
