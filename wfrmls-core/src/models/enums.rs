//! Open string enums for status and type fields.
//!
//! Each enum lists the values the service is known to send and keeps
//! anything else in `Other`, so new server-side values never fail
//! deserialization and round-trip unchanged.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value not known to this client.
            Other(String),
        }

        impl $name {
            /// Returns the wire value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Returns the known values, excluding `Other`.
            pub fn known() -> &'static [$name] {
                const KNOWN: &[$name] = &[ $( $name::$variant, )+ ];
                KNOWN
            }

            /// Returns true if this is a value the client does not know.
            pub fn is_other(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

// ============================================================================
// Property
// ============================================================================

open_enum! {
    /// `StandardStatus` of a property listing.
    PropertyStatus {
        /// Listed and available.
        Active => "Active",
        /// Under contract.
        Pending => "Pending",
        /// Closed sale.
        Sold => "Sold",
        /// Listing period ended.
        Expired => "Expired",
        /// Taken off the market.
        Withdrawn => "Withdrawn",
        /// Listing cancelled.
        Cancelled => "Cancelled",
    }
}

open_enum! {
    /// `PropertyType` of a listing.
    PropertyType {
        /// Residential property.
        Residential => "Residential",
        /// Commercial property.
        Commercial => "Commercial",
        /// Vacant land.
        Land => "Land",
        /// Rental property.
        Rental => "Rental",
    }
}

// ============================================================================
// Member & Office
// ============================================================================

open_enum! {
    /// `MemberStatus` of an agent.
    MemberStatus {
        /// Active member.
        Active => "Active",
        /// Inactive member.
        Inactive => "Inactive",
        /// Suspended member.
        Suspended => "Suspended",
    }
}

open_enum! {
    /// `MemberType` of an agent.
    MemberType {
        /// Licensed agent.
        Agent => "Agent",
        /// Broker.
        Broker => "Broker",
        /// Unlicensed assistant.
        Assistant => "Assistant",
    }
}

open_enum! {
    /// `OfficeStatus` of a brokerage office.
    OfficeStatus {
        /// Active office.
        Active => "Active",
        /// Inactive office.
        Inactive => "Inactive",
        /// Suspended office.
        Suspended => "Suspended",
    }
}

open_enum! {
    /// `OfficeType` of a brokerage office.
    OfficeType {
        /// Main office.
        Main => "Main",
        /// Branch office.
        Branch => "Branch",
        /// Franchise office.
        Franchise => "Franchise",
    }
}

// ============================================================================
// Open House
// ============================================================================

open_enum! {
    /// `OpenHouseStatus` of a scheduled open house.
    OpenHouseStatus {
        /// Scheduled.
        Active => "Active",
        /// Already happened.
        Ended => "Ended",
        /// Called off.
        Cancelled => "Cancelled",
    }
}

open_enum! {
    /// `OpenHouseType` of a scheduled open house.
    OpenHouseType {
        /// Open to the public.
        Public => "Public",
        /// By invitation.
        Private => "Private",
        /// Broker open.
        Broker => "Broker",
    }
}

open_enum! {
    /// `OpenHouseAttendedBy` of a scheduled open house.
    OpenHouseAttendedBy {
        /// Hosted by an agent.
        Agent => "Agent",
        /// Hosted by the owner.
        Owner => "Owner",
        /// Unattended.
        None => "None",
    }
}

// ============================================================================
// ADU
// ============================================================================

open_enum! {
    /// `AduType` of an accessory dwelling unit.
    AduType {
        /// Separate structure.
        Detached => "Detached",
        /// Attached to the main dwelling.
        Attached => "Attached",
        /// Converted garage.
        GarageConversion => "Garage Conversion",
        /// Basement unit.
        Basement => "Basement",
        /// Interior unit.
        Interior => "Interior",
    }
}

open_enum! {
    /// `AduStatus` of an accessory dwelling unit.
    AduStatus {
        /// Built and in use.
        Existing => "Existing",
        /// Permit granted.
        Permitted => "Permitted",
        /// Not yet permitted.
        Planned => "Planned",
        /// Being built.
        UnderConstruction => "Under Construction",
    }
}

// ============================================================================
// Media
// ============================================================================

open_enum! {
    /// `MediaType` of a media item.
    MediaType {
        /// Still photo.
        Photo => "Photo",
        /// Video.
        Video => "Video",
        /// Document.
        Document => "Document",
        /// Virtual tour.
        VirtualTour => "VirtualTour",
    }
}

open_enum! {
    /// `MediaCategory` of a media item.
    MediaCategory {
        /// Exterior shot.
        Exterior => "Exterior",
        /// Interior shot.
        Interior => "Interior",
        /// Kitchen.
        Kitchen => "Kitchen",
        /// Bathroom.
        Bathroom => "Bathroom",
        /// Bedroom.
        Bedroom => "Bedroom",
        /// Living room.
        LivingRoom => "LivingRoom",
        /// Dining room.
        DiningRoom => "DiningRoom",
        /// Garage.
        Garage => "Garage",
        /// Yard.
        Yard => "Yard",
        /// Pool.
        Pool => "Pool",
    }
}

// ============================================================================
// History
// ============================================================================

open_enum! {
    /// `TransactionType` of a historical transaction.
    HistoryTransactionType {
        /// Sale.
        Sale => "Sale",
        /// Lease.
        Lease => "Lease",
        /// Rental.
        Rental => "Rental",
        /// Auction.
        Auction => "Auction",
    }
}

open_enum! {
    /// `StandardStatus` of a historical transaction.
    HistoryStatus {
        /// Closed.
        Closed => "Closed",
        /// Sold.
        Sold => "Sold",
        /// Leased.
        Leased => "Leased",
        /// Expired.
        Expired => "Expired",
        /// Withdrawn.
        Withdrawn => "Withdrawn",
    }
}

// ============================================================================
// Green Verification
// ============================================================================

open_enum! {
    /// `GreenBuildingVerificationType` of a green verification.
    GreenVerificationType {
        /// ENERGY STAR certification.
        EnergyStar => "Energy Star",
        /// LEED certification.
        Leed => "LEED",
        /// Generic green building certification.
        GreenBuilding => "Green Building",
        /// HERS index rating.
        Hers => "HERS",
        /// The literal service value `Other`.
        Unspecified => "Other",
    }
}

// ============================================================================
// Tests
// ============================================================================
