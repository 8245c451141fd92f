use crate::math::PolynomialCoefficients;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// The built-in ellipsoids: name, semimajor axis, reciproque flattening
/// (where zero indicates a sphere), and description
#[rustfmt::skip]
pub(crate) const ELLIPSOID_LIST: [(&str, f64, f64, &str); 13] = [
    ("GRS80",   6_378_137.0,   298.257_222_100_882_7, "GRS 1980(IUGG, 1980)"),
    ("WGS84",   6_378_137.0,   298.257_223_563,       "WGS 84"),
    ("WGS72",   6_378_135.0,   298.26,                "WGS 72"),
    ("GRS67",   6_378_160.0,   298.247_167_427,       "GRS 67(IUGG 1967)"),
    ("intl",    6_378_388.0,   297.0,                 "International 1924 (Hayford 1909, 1910)"),
    ("Helmert", 6_378_200.0,   298.3,                 "Helmert 1906"),
    ("clrk66",  6_378_206.4,   294.978_698_213_898_2, "Clarke 1866"),
    ("clrk80",  6_378_249.145, 293.466_3,             "Clarke 1880 mod."),
    ("bessel",  6_377_397.155, 299.152_812_8,         "Bessel 1841"),
    ("airy",    6_377_563.396, 299.324_964_6,         "Airy 1830"),
    ("krass",   6_378_245.0,   298.3,                 "Krassovsky, 1942"),
    ("evrst30", 6_377_276.345, 300.801_7,             "Everest 1830"),
    ("sphere",  6_370_997.0,   0.0,                   "Normal Sphere (r=6370997)"),
];

/// Name-to-row index into the [ELLIPSOID_LIST]
pub(crate) static ELLIPSOID_INDEX: Lazy<BTreeMap<&'static str, usize>> = Lazy::new(|| {
    ELLIPSOID_LIST
        .iter()
        .enumerate()
        .map(|(index, ellps)| (ellps.0, index))
        .collect()
});

/// Coefficients of the even-order expansion of the normalized meridian arc
/// unit in terms of the squared third flattening
pub(crate) const MERIDIAN_ARC_COEFFICIENTS: [f64; 5] =
    [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];

/// Polynomial coefficients for the geographic-to-conformal (fwd) and
/// conformal-to-geographic (inv) latitude series, in powers of the third
/// flattening, n¹..n⁶
#[rustfmt::skip]
pub(crate) const CONFORMAL: PolynomialCoefficients = PolynomialCoefficients {
    fwd: [
        [-2.,  2. / 3.,  4. / 3.,   -82. / 45.,    32. / 45.,     4642. / 4725.],
        [ 0.,  5. / 3., -16. / 15., -13. / 9.,    904. / 315.,  -1522. / 945.],
        [ 0.,  0.,      -26. / 15.,  34. / 21.,     8. / 5.,   -12686. / 2835.],
        [ 0.,  0.,        0.,      1237. / 630.,  -12. / 5.,   -24832. / 14175.],
        [ 0.,  0.,        0.,         0.,        -734. / 315., 109598. / 31185.],
        [ 0.,  0.,        0.,         0.,          0.,         444337. / 155925.],
    ],
    inv: [
        [ 2., -2. / 3., -2.,        116. / 45.,    26. / 45.,    -2854. / 675.],
        [ 0.,  7. / 3., -8. / 5.,  -227. / 45.,  2704. / 315.,   2323. / 945.],
        [ 0.,  0.,      56. / 15., -136. / 35., -1262. / 105.,  73814. / 2835.],
        [ 0.,  0.,        0.,      4279. / 630., -332. / 35.,  -399572. / 14175.],
        [ 0.,  0.,        0.,         0.,        4174. / 315., -144838. / 6237.],
        [ 0.,  0.,        0.,         0.,           0.,         601676. / 22275.],
    ],
};
