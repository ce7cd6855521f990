//! Sample portfolio content written on first start.

use chrono::NaiveDate;

use crate::models::content::{NewProject, NewTestimonial};

/// Marker recorded in `bootstrap_markers` once the samples are in place.
pub const SAMPLE_CONTENT_MARKER: &str = "sample_content_v1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "The Hartley Kitchen Extension",
            description: "Single-storey rear extension with an open-plan kitchen, floor-to-ceiling bi-fold doors and a bespoke kitchen island.",
            category: "Extension",
            location: "Hertfordshire",
            image_url: "https://images.pexels.com/photos/1571460/pexels-photo-1571460.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: true,
            completed_date: date(2024, 9, 15),
            challenge: Some("A dated, cramped kitchen with a poor layout and structural limits, cut off from the garden."),
            solution: Some("A rear extension with bi-fold doors, exposed brick feature walls and structural steel for an open layout, finished with underfloor heating."),
            result: Some("A bright family space that added real value to the property."),
        },
        NewProject {
            title: "The Bennington Full Renovation",
            description: "Whole-house renovation with structural alterations, a two-storey side extension, full rewiring, new heating and high-end finishes.",
            category: "Renovation",
            location: "Buckinghamshire",
            image_url: "https://images.pexels.com/photos/1648776/pexels-photo-1648776.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: true,
            completed_date: date(2024, 6, 20),
            challenge: Some("A 1960s property needing a reconfigured ground floor, an ensuite and upgraded services throughout."),
            solution: Some("Structural alterations to open the ground floor, a two-storey side extension, full rewiring and new heating, managed end to end."),
            result: Some("A contemporary family home delivered on time with minimal disruption."),
        },
        NewProject {
            title: "Modern Loft Conversion",
            description: "Two-bedroom loft conversion with ensuite bathroom, clever storage and Velux windows.",
            category: "Conversion",
            location: "Bedfordshire",
            image_url: "https://images.pexels.com/photos/2635038/pexels-photo-2635038.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: true,
            completed_date: date(2024, 8, 10),
            challenge: None,
            solution: None,
            result: None,
        },
        NewProject {
            title: "Contemporary New Build",
            description: "Four-bedroom detached new build with open-plan living, high-spec kitchen and landscaped gardens.",
            category: "New Build",
            location: "Hertfordshire",
            image_url: "https://images.pexels.com/photos/106399/pexels-photo-106399.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: false,
            completed_date: date(2024, 5, 30),
            challenge: None,
            solution: None,
            result: None,
        },
        NewProject {
            title: "Luxury Kitchen Remodel",
            description: "High-end kitchen renovation with marble worktops, bespoke cabinetry and integrated appliances.",
            category: "Kitchen",
            location: "Buckinghamshire",
            image_url: "https://images.pexels.com/photos/2724748/pexels-photo-2724748.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: false,
            completed_date: date(2024, 7, 22),
            challenge: None,
            solution: None,
            result: None,
        },
        NewProject {
            title: "Period Property Restoration",
            description: "Restoration of a Victorian terrace including structural repairs, damp treatment and period features.",
            category: "Renovation",
            location: "Hertfordshire",
            image_url: "https://images.pexels.com/photos/1396132/pexels-photo-1396132.jpeg?auto=compress&cs=tinysrgb&w=1200",
            featured: false,
            completed_date: date(2024, 4, 18),
            challenge: None,
            solution: None,
            result: None,
        },
    ]
}

pub fn sample_testimonials() -> Vec<NewTestimonial> {
    vec![
        NewTestimonial {
            client_name: "Sarah & Tom Hartley",
            location: "Hertfordshire",
            project_type: "Kitchen Extension",
            quote: "The craftsmanship is outstanding and the process was far smoother than we expected.",
            rating: 5,
            featured: true,
        },
        NewTestimonial {
            client_name: "James & Emma Bennington",
            location: "Buckinghamshire",
            project_type: "Full Renovation",
            quote: "They took a tired, dated house and turned it into our dream home.",
            rating: 5,
            featured: true,
        },
        NewTestimonial {
            client_name: "Michael P.",
            location: "Bedfordshire",
            project_type: "Extension & Renovation",
            quote: "Exceptional quality and service from start to finish.",
            rating: 5,
            featured: true,
        },
        NewTestimonial {
            client_name: "Laura & David",
            location: "Hertfordshire",
            project_type: "Kitchen Extension",
            quote: "Professional, punctual and incredibly skilled. Our new kitchen is everything we hoped for.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Rachel S.",
            location: "Buckinghamshire",
            project_type: "Loft Conversion",
            quote: "Transparent pricing, clear communication and outstanding workmanship.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Simon & Jane",
            location: "Oxfordshire",
            project_type: "Full Home Renovation",
            quote: "They turned our vision into reality. The finish is flawless.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Katie M.",
            location: "Hertfordshire",
            project_type: "Two-Storey Extension",
            quote: "We were nervous about a big build, but they made it easy and delivered on every promise.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Andrew & Sarah",
            location: "Bedfordshire",
            project_type: "New Build",
            quote: "Fantastic attention to detail and a real commitment to getting things right.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Mark T.",
            location: "Buckinghamshire",
            project_type: "Conversion & Structural Work",
            quote: "From the first meeting to final handover they were brilliant.",
            rating: 5,
            featured: false,
        },
        NewTestimonial {
            client_name: "Emma L.",
            location: "Hertfordshire",
            project_type: "Bathroom & Kitchen Renovation",
            quote: "Professional, reliable and skilled. The only builders we'll ever use.",
            rating: 5,
            featured: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sizes() {
        assert_eq!(sample_projects().len(), 6);
        assert_eq!(sample_testimonials().len(), 10);
    }

    #[test]
    fn test_three_featured_of_each() {
        assert_eq!(sample_projects().iter().filter(|p| p.featured).count(), 3);
        assert_eq!(sample_testimonials().iter().filter(|t| t.featured).count(), 3);
    }

    #[test]
    fn test_sample_dates_valid() {
        for p in sample_projects() {
            assert_ne!(p.completed_date, NaiveDate::default(), "{}", p.title);
        }
    }
}
