use steerable_pyramid as sp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a disk on a dark background, or pass the path of an image to use instead
    let image = match std::env::args().nth(1) {
        Some(path) => sp::load_plane(&path)?,
        None => sp::Plane::from_fn(sp::Dims::square(256), |x, y| {
            let (dx, dy) = (x as f64 - 128.0, y as f64 - 128.0);
            if dx.hypot(dy) < 64.0 {
                1.0
            } else {
                0.0
            }
        }),
    };

    //create a new session
    let session = sp::Session::builder()
        .depth(3)
        .orientations(4)
        .build()?;

    //split the image into subbands
    let pyramid = session.decompose(&image)?;

    //save the magnitude of every subband, scaled to its own maximum
    std::fs::create_dir_all("out")?;
    for (d, octave) in pyramid.subbands().iter().enumerate() {
        for (n, scale) in octave.iter().enumerate() {
            for (k, band) in scale.iter().enumerate() {
                let magnitude = band.map(|c| c.norm());
                let max = magnitude.as_slice().iter().cloned().fold(0.0, f64::max);
                let normalized = magnitude.map(|m| if max > 0.0 { m / max } else { 0.0 });

                sp::utils::plane_to_luma(&normalized)
                    .save(format!("out/01_subband_{}_{}_{}.png", d, n, k))?;
            }
        }
    }

    //and the image put back together
    let restored = session.reconstruct(&pyramid)?;
    sp::utils::plane_to_luma(&restored.re()).save("out/01_restored.png")?;

    Ok(())
}
