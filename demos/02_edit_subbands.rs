use steerable_pyramid as sp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let image = match std::env::args().nth(1) {
        Some(path) => sp::load_plane(&path)?,
        None => sp::Plane::from_fn(sp::Dims::new(320, 200), |x, y| {
            if (x / 20 + y / 20) % 2 == 0 {
                0.8
            } else {
                0.2
            }
        }),
    };

    let session = sp::Session::builder()
        .depth(2)
        .scales(2)
        .orientations(6)
        .stretch(true)
        .build()?;

    let pyramid = session.decompose(&image)?;
    let (stretch, resampling) = (pyramid.stretch(), pyramid.resampling());
    let (mut subbands, high_residual, low_residual) = pyramid.into_parts();

    //boost the finest octave and keep only the orientations near horizontal
    //frequencies in it, which sharpens vertical edges
    let orientations = subbands[0][0].len();
    for scale in subbands[0].iter_mut() {
        for (k, band) in scale.iter_mut().enumerate() {
            let gain = if k == 0 || k + 1 == orientations { 2.0 } else { 1.0 };
            *band = band.map(|c| c * gain);
        }
    }

    //drop everything above the subbands
    let high_residual = sp::Plane::filled(high_residual.dims(), sp::Complex64::default());

    let edited = sp::Pyramid::from_parts(subbands, high_residual, low_residual)?
        .with_settings(stretch, resampling);
    let restored = sp::reconstruct(&edited)?;

    std::fs::create_dir_all("out")?;
    sp::utils::plane_to_luma(&restored.re()).save("out/02_edited.png")?;

    Ok(())
}
